// ABOUTME: Per-client coaching session tying store, composer, gateway and last results together
// ABOUTME: Rejects resubmission while a flow is in flight and clears stale results before each call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coaching session
//!
//! A session owns one measurement store and remembers the last result of
//! each flow. Every submission holds an [`InFlightGuard`] for its flow while
//! it runs; a second submission of the same flow is rejected with
//! `ResourceLocked` until the guard drops, whatever the exit path.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, warn};

use crate::composer::{self, FlowDecision};
use crate::constants::flows;
use crate::errors::{AppError, AppResult};
use crate::gateway::{AiGateway, BodyAnalysisFlow, DailyGoalFlow, DietPlanFlow, Flow, WorkoutPlanFlow};
use crate::logging::AppLogger;
use crate::models::{
    BodyAnalysisResult, BodyMeasurements, DailyGoalResult, DietPlanForm, DietPlanResult,
    MeasurementRecord, WorkoutPlanRequest, WorkoutPlanResult,
};
use crate::storage::MeasurementStore;

/// Last successful result of each flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowResults {
    /// Last workout plan
    pub workout_plan: Option<WorkoutPlanResult>,
    /// Last diet plan
    pub diet_plan: Option<DietPlanResult>,
    /// Last body analysis
    pub body_analysis: Option<BodyAnalysisResult>,
    /// Last daily goal
    pub daily_goal: Option<DailyGoalResult>,
}

/// Flows whose result the session remembers
trait Remembered: Flow {
    fn slot(results: &mut FlowResults) -> &mut Option<Self::Output>;
}

impl Remembered for WorkoutPlanFlow {
    fn slot(results: &mut FlowResults) -> &mut Option<Self::Output> {
        &mut results.workout_plan
    }
}

impl Remembered for DietPlanFlow {
    fn slot(results: &mut FlowResults) -> &mut Option<Self::Output> {
        &mut results.diet_plan
    }
}

impl Remembered for BodyAnalysisFlow {
    fn slot(results: &mut FlowResults) -> &mut Option<Self::Output> {
        &mut results.body_analysis
    }
}

impl Remembered for DailyGoalFlow {
    fn slot(results: &mut FlowResults) -> &mut Option<Self::Output> {
        &mut results.daily_goal
    }
}

#[derive(Debug, Default)]
struct SessionState {
    results: FlowResults,
    in_flight: HashSet<&'static str>,
}

/// Marks a flow as in flight until dropped
pub struct InFlightGuard<'a> {
    session: &'a CoachSession,
    flow: &'static str,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.state().in_flight.remove(self.flow);
    }
}

/// One client's coaching session
pub struct CoachSession {
    id: String,
    store: MeasurementStore,
    gateway: AiGateway,
    trend_window: usize,
    state: Mutex<SessionState>,
}

impl CoachSession {
    /// Create a session
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        store: MeasurementStore,
        gateway: AiGateway,
        trend_window: usize,
    ) -> Self {
        Self {
            id: id.into(),
            store,
            gateway,
            trend_window,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Session id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Measurement store of this session
    #[must_use]
    pub const fn store(&self) -> &MeasurementStore {
        &self.store
    }

    /// Snapshot of the last results
    #[must_use]
    pub fn results(&self) -> FlowResults {
        self.state().results.clone()
    }

    /// Whether `flow` currently has a call outstanding
    #[must_use]
    pub fn is_in_flight(&self, flow: &str) -> bool {
        self.state().in_flight.contains(flow)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark `flow` in flight
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` if the flow is already in flight.
    pub fn begin(&self, flow: &'static str) -> AppResult<InFlightGuard<'_>> {
        if !self.state().in_flight.insert(flow) {
            warn!(session.id = %self.id, flow, "Resubmission rejected while in flight");
            return Err(AppError::in_flight(flow));
        }
        Ok(InFlightGuard {
            session: self,
            flow,
        })
    }

    /// Clear the previous result, call the gateway and remember a success
    async fn call<F>(&self, request: &F::Request) -> AppResult<F::Output>
    where
        F: Remembered,
        F::Output: Clone,
    {
        self.forget::<F>();
        let output = self.gateway.invoke::<F>(request).await?;
        self.remember::<F>(&output);
        Ok(output)
    }

    fn forget<F: Remembered>(&self) {
        *F::slot(&mut self.state().results) = None;
    }

    fn remember<F>(&self, output: &F::Output)
    where
        F: Remembered,
        F::Output: Clone,
    {
        *F::slot(&mut self.state().results) = Some(output.clone());
    }

    fn log_outcome(&self, flow: &str, started: Instant, result: &AppResult<impl Sized>) {
        let outcome = match result {
            Ok(_) => "success",
            Err(e) if e.code.is_client_error() => "rejected",
            Err(_) => "failed",
        };
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_flow_outcome(&self.id, flow, outcome, elapsed);
    }

    /// Generate today's workout plan
    ///
    /// # Errors
    ///
    /// Returns a validation error, `ResourceLocked`, or the gateway failure.
    pub async fn submit_workout_plan(
        &self,
        request: WorkoutPlanRequest,
    ) -> AppResult<WorkoutPlanResult> {
        let started = Instant::now();
        let result = async {
            let request = composer::compose_workout_plan(request)?;
            let _guard = self.begin(flows::WORKOUT_PLAN)?;
            self.call::<WorkoutPlanFlow>(&request).await
        }
        .await;
        self.log_outcome(flows::WORKOUT_PLAN, started, &result);
        result
    }

    /// Generate a diet plan, filling weight and height from the latest record
    ///
    /// # Errors
    ///
    /// Returns a validation or composition error, `ResourceLocked`, a storage
    /// error, or the gateway failure.
    pub async fn submit_diet_plan(&self, form: DietPlanForm) -> AppResult<DietPlanResult> {
        let started = Instant::now();
        let result = async {
            let latest = self.store.latest().await?;
            let request = composer::compose_diet_plan(form, latest.as_ref())?;
            let _guard = self.begin(flows::DIET_PLAN)?;
            self.call::<DietPlanFlow>(&request).await
        }
        .await;
        self.log_outcome(flows::DIET_PLAN, started, &result);
        result
    }

    /// Analyze today's measurements and append them to the history on success
    ///
    /// The all-zero placeholder returns the canned result without contacting
    /// the AI service or touching the history.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `ResourceLocked`, the gateway failure, or
    /// a storage error from the append.
    pub async fn submit_body_analysis(
        &self,
        measurements: BodyMeasurements,
    ) -> AppResult<BodyAnalysisResult> {
        let started = Instant::now();
        let result = async {
            let decision = composer::compose_body_analysis(measurements)?;
            let _guard = self.begin(flows::BODY_ANALYSIS)?;
            match decision {
                FlowDecision::Canned(canned) => {
                    debug!(session.id = %self.id, "Placeholder measurements, using canned analysis");
                    self.remember::<BodyAnalysisFlow>(&canned);
                    Ok(canned)
                }
                FlowDecision::GatewayCall(request) => {
                    // remembered only once the measurement is in the history
                    self.forget::<BodyAnalysisFlow>();
                    let analysis = self.gateway.invoke::<BodyAnalysisFlow>(&request).await?;
                    self.store
                        .append(MeasurementRecord::captured_today(request))
                        .await?;
                    self.remember::<BodyAnalysisFlow>(&analysis);
                    Ok(analysis)
                }
            }
        }
        .await;
        self.log_outcome(flows::BODY_ANALYSIS, started, &result);
        result
    }

    /// Generate today's goal from the recent history
    ///
    /// Fewer than two stored records returns the canned "first steps" goal.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked`, a storage error, or the gateway failure.
    pub async fn daily_goal(&self) -> AppResult<DailyGoalResult> {
        let started = Instant::now();
        let result = async {
            let history = self.store.load_all().await?;
            let _guard = self.begin(flows::DAILY_GOAL)?;
            match composer::compose_daily_goal(&history, self.trend_window) {
                FlowDecision::Canned(canned) => {
                    self.remember::<DailyGoalFlow>(&canned);
                    Ok(canned)
                }
                FlowDecision::GatewayCall(request) => self.call::<DailyGoalFlow>(&request).await,
            }
        }
        .await;
        self.log_outcome(flows::DAILY_GOAL, started, &result);
        result
    }
}

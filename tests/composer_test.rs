// ABOUTME: Integration tests for the request composer
// ABOUTME: Covers validation, diet history fill, canned fallbacks and daily goal windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{measurements, record_with_arm, typical_measurements};
use teen_fitness_coach::composer::{
    compose_body_analysis, compose_daily_goal, compose_daily_goal_request, compose_diet_plan,
    compose_workout_plan, FlowDecision,
};
use teen_fitness_coach::errors::{CompositionError, ErrorCode};
use teen_fitness_coach::models::{
    BodyAnalysisResult, BodyMeasurements, DailyGoalResult, DietPlanForm, Equipment,
    ExerciseLevel, FitnessLevel, Gender, MeasurementField, MeasurementRecord,
    WorkoutPlanRequest,
};

fn diet_form() -> DietPlanForm {
    DietPlanForm {
        schedule: "School 8-4, soccer practice at 6".to_owned(),
        food_preferences: "Likes chicken, no peanuts".to_owned(),
        target_calories: 2400,
        current_weight: None,
        target_weight: 62.0,
        height: None,
        age: 15,
        gender: Gender::Male,
        exercise_level: ExerciseLevel::ModeratelyActive,
    }
}

#[test]
fn test_workout_plan_requires_equipment() {
    let err = compose_workout_plan(WorkoutPlanRequest {
        fitness_level: FitnessLevel::Beginner,
        available_equipment: Vec::new(),
        time_constraints: 30,
    })
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(err.details["field"], "availableEquipment");
}

#[test]
fn test_workout_plan_time_bounds() {
    let request = |minutes| WorkoutPlanRequest {
        fitness_level: FitnessLevel::Intermediate,
        available_equipment: vec![Equipment::Bodyweight],
        time_constraints: minutes,
    };
    assert!(compose_workout_plan(request(10)).is_ok());
    assert!(compose_workout_plan(request(120)).is_ok());
    assert_eq!(
        compose_workout_plan(request(9)).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert_eq!(
        compose_workout_plan(request(121)).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
}

#[test]
fn test_diet_plan_fills_weight_and_height_from_latest_record() {
    let latest = MeasurementRecord::new("07.08", measurements(171.0, 60.5, 29.0, 105.0, 72.0, 50.0));
    let request = compose_diet_plan(diet_form(), Some(&latest)).unwrap();
    assert!((request.current_weight - 60.5).abs() < f64::EPSILON);
    assert!((request.height - 171.0).abs() < f64::EPSILON);
}

#[test]
fn test_diet_plan_form_values_win_over_history() {
    let latest = MeasurementRecord::new("07.08", typical_measurements());
    let form = DietPlanForm {
        current_weight: Some(64.0),
        height: Some(175.0),
        ..diet_form()
    };
    let request = compose_diet_plan(form, Some(&latest)).unwrap();
    assert!((request.current_weight - 64.0).abs() < f64::EPSILON);
    assert!((request.height - 175.0).abs() < f64::EPSILON);
}

#[test]
fn test_diet_plan_without_history_or_form_values_fails() {
    let err = compose_diet_plan(diet_form(), None).unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientData);
    assert!(err.message.contains("currentWeight"));
}

#[test]
fn test_diet_plan_validates_ranges() {
    let latest = MeasurementRecord::new("07.08", typical_measurements());
    let young = DietPlanForm {
        age: 12,
        ..diet_form()
    };
    let err = compose_diet_plan(young, Some(&latest)).unwrap_err();
    assert_eq!(err.details["field"], "age");

    let short_schedule = DietPlanForm {
        schedule: "school".to_owned(),
        ..diet_form()
    };
    let err = compose_diet_plan(short_schedule, Some(&latest)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.details["field"], "schedule");
}

#[test]
fn test_body_analysis_placeholder_is_canned() {
    let decision = compose_body_analysis(BodyMeasurements::default()).unwrap();
    assert_eq!(decision, FlowDecision::Canned(BodyAnalysisResult::placeholder()));
}

#[test]
fn test_body_analysis_rejects_partial_input() {
    let partial = BodyMeasurements {
        height_cm: 168.0,
        ..BodyMeasurements::default()
    };
    let err = compose_body_analysis(partial).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(err.details["field"], "weight");
}

#[test]
fn test_body_analysis_valid_input_calls_gateway() {
    let decision = compose_body_analysis(typical_measurements()).unwrap();
    assert_eq!(decision, FlowDecision::GatewayCall(typical_measurements()));
}

#[test]
fn test_daily_goal_with_short_history_is_canned() {
    assert_eq!(
        compose_daily_goal(&[], 5),
        FlowDecision::Canned(DailyGoalResult::first_steps())
    );
    assert_eq!(
        compose_daily_goal(&[record_with_arm("07.01", 29.0)], 5),
        FlowDecision::Canned(DailyGoalResult::first_steps())
    );
    assert_eq!(
        compose_daily_goal_request(&[record_with_arm("07.01", 29.0)], 5),
        Err(CompositionError::InsufficientHistory {
            flow: "dailyGoal",
            required: 2,
            available: 1,
        })
    );
}

#[test]
fn test_daily_goal_carries_last_five_records_and_trend() {
    let history: Vec<_> = (1..=7)
        .map(|day| record_with_arm(&format!("07.{day:02}"), 28.0 + f64::from(day)))
        .collect();

    let FlowDecision::GatewayCall(request) = compose_daily_goal(&history, 5) else {
        panic!("expected a gateway call");
    };
    assert_eq!(request.history.len(), 5);
    assert_eq!(request.history[0].date, "07.03");
    assert_eq!(request.history[4].date, "07.07");
    let arm = request
        .trend
        .iter()
        .find(|trend| trend.field == MeasurementField::Arm)
        .unwrap();
    assert!((arm.delta - 4.0).abs() < 1e-9);
}

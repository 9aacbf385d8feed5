// ABOUTME: Result presenter mapping typed flow results and history into display values
// ABOUTME: Workout summary line, set/rest labels, analysis sections, chart series and badges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Result Presenter
//!
//! Pure formatting; every function here takes an already validated value.

use serde::Serialize;

use crate::models::{
    BodyAnalysisResult, DailyGoalResult, DietPlanResult, Exercise, MeasurementField,
    MeasurementRecord, WorkoutPlanResult,
};

/// Fields drawn on the circumference chart
const CIRCUMFERENCE_CHART: [MeasurementField; 3] = [
    MeasurementField::Arm,
    MeasurementField::Shoulder,
    MeasurementField::Thigh,
];

/// (minimum records, label) of each progress badge
const BADGES: [(usize, &str); 3] = [
    (1, "🔥 첫 운동 완료"),
    (5, "💪 5회 기록 달성"),
    (10, "🚀 10회 기록 달성"),
];

/// Display row of one exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRow {
    /// Exercise name
    pub name: String,
    /// Target muscle group
    pub part: String,
    /// e.g. `3세트 × 10-12`
    pub sets_and_reps: String,
    /// e.g. `휴식 60초`
    pub rest: String,
    /// Coaching tip
    pub description: String,
}

/// Workout plan as shown on the dashboard and workout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanView {
    /// Routine title
    pub title: String,
    /// One-line summary of the routine
    pub summary: String,
    /// Exercises in order
    pub exercises: Vec<ExerciseRow>,
    /// Coach message
    pub motivational_message: String,
}

/// Diet plan view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanView {
    /// Markdown plan, rendered by the client
    pub markdown: String,
}

/// Titled paragraph of the body analysis card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Section heading
    pub heading: String,
    /// Section text
    pub body: String,
}

/// Body analysis card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyAnalysisView {
    /// Card title
    pub title: String,
    /// Sections in display order
    pub sections: Vec<Section>,
}

/// Daily goal card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoalView {
    /// Today's focus
    pub main_focus: String,
    /// Small habit for today
    pub habit_suggestion: String,
    /// Coach message
    pub motivational_message: String,
}

/// One point of a chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// `MM.DD` label
    pub date: String,
    /// Measured value
    pub value: f64,
}

/// One line of a progress chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Measurement drawn
    pub field: MeasurementField,
    /// Korean legend label
    pub label: &'static str,
    /// Unit suffix
    pub unit: &'static str,
    /// Points, oldest first
    pub points: Vec<ChartPoint>,
}

/// Progress badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Badge label
    pub label: &'static str,
    /// Whether the history has reached the badge
    pub earned: bool,
}

/// Progress page content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    /// Full history, oldest first
    pub history: Vec<MeasurementRecord>,
    /// Arm, shoulder and thigh series
    pub circumference: Vec<ChartSeries>,
    /// Weight series
    pub weight: ChartSeries,
    /// All badges, earned or not
    pub badges: Vec<Badge>,
}

/// Summary line listing the exercise names
#[must_use]
pub fn workout_summary(exercises: &[Exercise]) -> String {
    let names: Vec<&str> = exercises.iter().map(|e| e.name.as_str()).collect();
    format!("{} 등으로 구성된 효과적인 운동입니다.", names.join(", "))
}

/// Present a workout plan
#[must_use]
pub fn present_workout_plan(result: &WorkoutPlanResult) -> WorkoutPlanView {
    WorkoutPlanView {
        title: result.title.clone(),
        summary: workout_summary(&result.workout_plan),
        exercises: result
            .workout_plan
            .iter()
            .map(|exercise| ExerciseRow {
                name: exercise.name.clone(),
                part: exercise.part.clone(),
                sets_and_reps: format!("{}세트 × {}", exercise.sets, exercise.reps),
                rest: format!("휴식 {}초", exercise.rest),
                description: exercise.description.clone(),
            })
            .collect(),
        motivational_message: result.motivational_message.clone(),
    }
}

/// Present a diet plan
#[must_use]
pub fn present_diet_plan(result: &DietPlanResult) -> DietPlanView {
    DietPlanView {
        markdown: result.diet_plan.clone(),
    }
}

/// Present a body analysis; the growth tip section is omitted when blank
#[must_use]
pub fn present_body_analysis(result: &BodyAnalysisResult) -> BodyAnalysisView {
    let mut sections = vec![
        Section {
            heading: "AI 분석".to_owned(),
            body: result.analysis.clone(),
        },
        Section {
            heading: "AI 추천".to_owned(),
            body: result.recommendation.clone(),
        },
    ];
    if !result.height_growth_tip.trim().is_empty() {
        sections.push(Section {
            heading: "키 성장 팁".to_owned(),
            body: result.height_growth_tip.clone(),
        });
    }
    BodyAnalysisView {
        title: result.title.clone(),
        sections,
    }
}

/// Present a daily goal
#[must_use]
pub fn present_daily_goal(result: &DailyGoalResult) -> DailyGoalView {
    DailyGoalView {
        main_focus: result.main_focus.clone(),
        habit_suggestion: result.habit_suggestion.clone(),
        motivational_message: result.motivational_message.clone(),
    }
}

/// Series of one field keyed by record date
#[must_use]
pub fn chart_series(history: &[MeasurementRecord], field: MeasurementField) -> ChartSeries {
    ChartSeries {
        field,
        label: field.label(),
        unit: field.unit(),
        points: history
            .iter()
            .map(|record| ChartPoint {
                date: record.date.clone(),
                value: field.value(&record.measurements),
            })
            .collect(),
    }
}

/// Badges for a history of `record_count` entries
#[must_use]
pub fn badges(record_count: usize) -> Vec<Badge> {
    BADGES
        .iter()
        .map(|&(required, label)| Badge {
            label,
            earned: record_count >= required,
        })
        .collect()
}

/// Present the progress page
#[must_use]
pub fn present_progress(history: Vec<MeasurementRecord>) -> ProgressView {
    let circumference = CIRCUMFERENCE_CHART
        .iter()
        .map(|&field| chart_series(&history, field))
        .collect();
    let weight = chart_series(&history, MeasurementField::Weight);
    let badges = badges(history.len());
    ProgressView {
        history,
        circumference,
        weight,
        badges,
    }
}

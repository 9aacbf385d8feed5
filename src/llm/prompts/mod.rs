// ABOUTME: Prompt templates for the coaching flows loaded at compile time
// ABOUTME: Renders {{field}} placeholders and the {{#history}} block from flow requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Templates
//!
//! Prompts live in markdown files next to this module and are compiled in
//! with `include_str!`. A template may contain `{{name}}` placeholders and
//! one `{{#history}} ... {{/history}}` block that is repeated per record.

use crate::models::{
    BodyAnalysisRequest, DailyGoalRequest, DietPlanRequest, FieldTrend, MeasurementRecord,
    WorkoutPlanRequest,
};

/// Coach persona shared by every flow
pub const COACH_SYSTEM_PROMPT: &str = include_str!("system.md");

/// Workout plan template
pub const WORKOUT_PLAN_TEMPLATE: &str = include_str!("workout_plan.md");

/// Diet plan template
pub const DIET_PLAN_TEMPLATE: &str = include_str!("diet_plan.md");

/// Body analysis template
pub const BODY_ANALYSIS_TEMPLATE: &str = include_str!("body_analysis.md");

/// Daily goal template
pub const DAILY_GOAL_TEMPLATE: &str = include_str!("daily_goal.md");

const HISTORY_OPEN: &str = "{{#history}}";
const HISTORY_CLOSE: &str = "{{/history}}";
const PLACEHOLDER_OPEN: &str = "{{";
const PLACEHOLDER_CLOSE: &str = "}}";

/// Get the system prompt shared by all coaching flows
#[must_use]
pub const fn get_coach_system_prompt() -> &'static str {
    COACH_SYSTEM_PROMPT
}

/// Replace every `{{name}}` placeholder with its binding
///
/// The template is scanned once, so substituted values are never searched
/// for placeholders. Placeholders without a binding are left untouched.
#[must_use]
pub fn render(template: &str, bindings: &[(&str, String)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
        rendered.push_str(&rest[..open]);
        let inner = &rest[open + PLACEHOLDER_OPEN.len()..];
        let Some(close) = inner.find(PLACEHOLDER_CLOSE) else {
            rest = &rest[open..];
            break;
        };
        let name = &inner[..close];
        let end = open + PLACEHOLDER_OPEN.len() + close + PLACEHOLDER_CLOSE.len();
        match bindings.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => rendered.push_str(value),
            None => rendered.push_str(&rest[open..end]),
        }
        rest = &rest[end..];
    }

    rendered.push_str(rest);
    rendered
}

/// Render a template whose `{{#history}}` block repeats once per record
#[must_use]
pub fn render_with_history(
    template: &str,
    bindings: &[(&str, String)],
    history: &[MeasurementRecord],
) -> String {
    match (template.find(HISTORY_OPEN), template.find(HISTORY_CLOSE)) {
        (Some(open), Some(close)) if open < close => {
            let block = template[open + HISTORY_OPEN.len()..close].trim_matches('\n');
            let rows: Vec<String> = history
                .iter()
                .map(|record| render(block, &record_bindings(record)))
                .collect();
            format!(
                "{}{}{}",
                render(&template[..open], bindings),
                rows.join("\n"),
                render(&template[close + HISTORY_CLOSE.len()..], bindings)
            )
        }
        _ => render(template, bindings),
    }
}

fn record_bindings(record: &MeasurementRecord) -> Vec<(&'static str, String)> {
    let m = &record.measurements;
    vec![
        ("date", record.date.clone()),
        ("height", m.height_cm.to_string()),
        ("weight", m.weight_kg.to_string()),
        ("arm", m.arm_cm.to_string()),
        ("shoulder", m.shoulder_cm.to_string()),
        ("waist", m.waist_cm.to_string()),
        ("thigh", m.thigh_cm.to_string()),
    ]
}

fn trend_lines(trend: &[FieldTrend]) -> String {
    if trend.is_empty() {
        return "- (not computed)".to_owned();
    }
    trend
        .iter()
        .map(|t| {
            format!(
                "- {}: {:+.1}{} ({})",
                t.field.label(),
                t.delta,
                t.field.unit(),
                t.classification
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction for a workout plan request
#[must_use]
pub fn workout_plan(request: &WorkoutPlanRequest) -> String {
    let equipment = request
        .available_equipment
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    render(
        WORKOUT_PLAN_TEMPLATE,
        &[
            ("fitnessLevel", request.fitness_level.to_string()),
            ("availableEquipment", equipment),
            ("timeConstraints", request.time_constraints.to_string()),
        ],
    )
}

/// Instruction for a diet plan request
#[must_use]
pub fn diet_plan(request: &DietPlanRequest) -> String {
    render(
        DIET_PLAN_TEMPLATE,
        &[
            ("schedule", request.schedule.clone()),
            ("foodPreferences", request.food_preferences.clone()),
            ("targetCalories", request.target_calories.to_string()),
            ("currentWeight", request.current_weight.to_string()),
            ("targetWeight", request.target_weight.to_string()),
            ("height", request.height.to_string()),
            ("age", request.age.to_string()),
            ("gender", request.gender.as_str().to_owned()),
            ("exerciseLevel", request.exercise_level.to_string()),
        ],
    )
}

/// Instruction for a body analysis request
#[must_use]
pub fn body_analysis(request: &BodyAnalysisRequest) -> String {
    render(
        BODY_ANALYSIS_TEMPLATE,
        &[
            ("height", request.height_cm.to_string()),
            ("weight", request.weight_kg.to_string()),
            ("arm", request.arm_cm.to_string()),
            ("shoulder", request.shoulder_cm.to_string()),
            ("waist", request.waist_cm.to_string()),
            ("thigh", request.thigh_cm.to_string()),
        ],
    )
}

/// Instruction for a daily goal request
#[must_use]
pub fn daily_goal(request: &DailyGoalRequest) -> String {
    render_with_history(
        DAILY_GOAL_TEMPLATE,
        &[("trend", trend_lines(&request.trend))],
        &request.history,
    )
}

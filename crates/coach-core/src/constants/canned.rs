// ABOUTME: Canned fallback copy for flows that skip the AI service
// ABOUTME: Body analysis placeholder input and short daily-goal histories use these texts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Body analysis shown before any real measurement was entered
pub mod body_analysis {
    /// Card title
    pub const TITLE: &str = "AI가 당신의 몸을 분석해드려요!";
    /// Analysis paragraph
    pub const ANALYSIS: &str = "AI가 당신의 신체를 분석하고 맞춤 피드백을 드립니다. 오늘의 신체 치수를 입력하고 '분석 요청 및 기록 추가' 버튼을 눌러주세요.";
    /// Recommendation paragraph
    pub const RECOMMENDATION: &str = "키, 몸무게, 팔, 어깨, 허리, 허벅지 둘레를 측정해서 입력해보세요. 꾸준한 기록은 성장의 가장 중요한 증거입니다.";
    /// Height growth tip
    pub const HEIGHT_GROWTH_TIP: &str = "충분한 수면과 균형 잡힌 식사, 꾸준한 스트레칭이 키 성장의 기본입니다. 오늘 밤은 일찍 자볼까요?";
}

/// Daily goal for users with fewer than two measurements
pub mod daily_goal {
    /// Main focus line
    pub const MAIN_FOCUS: &str = "꾸준함이 최고의 무기!";
    /// Habit suggestion
    pub const HABIT_SUGGESTION: &str = "오늘 운동 기록하고, 내일의 변화를 만들어보세요.";
    /// Motivational message
    pub const MOTIVATIONAL_MESSAGE: &str =
        "위대한 여정의 첫걸음을 뗀 것을 환영해요! 첫 기록부터 시작해봐요.";
}

/// User-facing failure prefixes, one per flow
pub mod failure_prefix {
    /// Workout plan generation failed
    pub const WORKOUT_PLAN: &str = "운동 계획 생성에 실패했습니다";
    /// Diet plan generation failed
    pub const DIET_PLAN: &str = "식단 계획 생성에 실패했습니다";
    /// Body analysis failed
    pub const BODY_ANALYSIS: &str = "신체 측정 분석에 실패했습니다";
    /// Daily goal generation failed
    pub const DAILY_GOAL: &str = "오늘의 목표 생성에 실패했습니다";
}

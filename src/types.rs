//! Core types for the stats engine
//!
//! This module defines the value types that flow through the engine: habit
//! completion and goal progress records after boundary validation, goals with
//! their derived status, and the summary types assembled into reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One habit-log entry for one day.
///
/// At most one record per (habit_id, date) pair is meaningful for streak
/// purposes; the boundary adapter collapses duplicates before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
}

/// An incremental contribution toward a cumulative goal.
///
/// Multiple records may exist for the same date; the aggregator sums them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub goal_id: i64,
    pub date: NaiveDate,
    pub value: f64,
}

/// Goal tracking style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Cumulative count toward a numeric target
    Count,
    /// Done-or-not goal; progress is 0 or 100, never a division
    Binary,
    /// Fixed checkpoint evaluated against an expected-by-date value
    Milestone,
}

/// A tracked goal with its current progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub current_value: f64,
    pub target_value: f64,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub kind: GoalKind,
}

/// Derived goal status, recomputed on every read and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "on-track")]
    OnTrack,
    #[serde(rename = "due-soon")]
    DueSoon,
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "behind")]
    Behind,
    #[serde(rename = "milestone-met")]
    MilestoneMet,
    #[serde(rename = "milestone-behind")]
    MilestoneBehind,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Completed => "completed",
            GoalStatus::OnTrack => "on-track",
            GoalStatus::DueSoon => "due-soon",
            GoalStatus::Overdue => "overdue",
            GoalStatus::Behind => "behind",
            GoalStatus::MilestoneMet => "milestone-met",
            GoalStatus::MilestoneBehind => "milestone-behind",
        }
    }
}

/// A fixed intermediate checkpoint within a larger goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub goal_id: i64,
    pub checkpoint: u32,
    pub expected_value: f64,
    pub due_date: NaiveDate,
}

/// Completion rate for one weekday bucket (0 = Sunday .. 6 = Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekRate {
    pub weekday: u8,
    pub completions: u32,
    pub possible: u32,
    /// completions / possible as a percentage; 0 when possible is 0
    pub rate: f64,
}

/// Monday-anchored weekly completion rollup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCompletion {
    pub week_start: NaiveDate,
    pub completions: u32,
    pub possible: u32,
    pub percent: f64,
}

/// Habit-tracker summary for one reference date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    pub weekly: WeeklyCompletion,
    pub day_of_week: Vec<DayOfWeekRate>,
    /// Exponential-decay strength score as of the reference date, present
    /// when a habit frequency was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_score: Option<f64>,
}

/// One classified goal in a summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatusEntry {
    pub id: i64,
    pub title: String,
    pub status: GoalStatus,
    pub progress_percent: u32,
}

/// Goal summary: per-goal status plus counts by status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub goals: Vec<GoalStatusEntry>,
    pub counts: BTreeMap<String, u32>,
}

/// Climbing summary aggregated across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimbingSummary {
    pub total_sessions: u32,
    pub problems_attempted: u32,
    pub problems_sent: u32,
    pub total_attempts: u32,
    pub total_minutes: u32,
    pub send_rate: f64,
    pub flash_rate: f64,
    pub max_grade: String,
    pub average_grade: String,
    pub grade_distribution: BTreeMap<String, u32>,
    pub absurd: crate::climbing::comparisons::ComparisonSet,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete dashboard report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub report_version: String,
    pub producer: ReportProducer,
    /// Reference date the summaries were computed against
    pub generated_for: NaiveDate,
    pub computed_at_utc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habits: Option<HabitSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climbing: Option<ClimbingSummary>,
}

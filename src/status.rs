//! Goal status classification
//!
//! Assigns a status category from deadline proximity and expected-vs-actual
//! progress. Rules are evaluated as an ordered decision list; the first
//! matching rule wins. The thresholds are user-visible calendar behavior,
//! so they are kept as configurable constants rather than tuned.

use crate::types::{Goal, GoalKind, GoalStatus, Milestone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before the due date at which a goal is flagged due-soon
pub const DEFAULT_DUE_SOON_DAYS: i64 = 14;

/// Fraction of linearly-expected progress below which a goal is flagged
/// behind. Only a >15%-relative shortfall triggers the warning, so minor
/// day-to-day variance does not flip the status.
pub const DEFAULT_BEHIND_RATIO: f64 = 0.85;

/// Classifier thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    pub due_soon_days: i64,
    pub behind_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            behind_ratio: DEFAULT_BEHIND_RATIO,
        }
    }
}

/// Classify a goal against a reference date.
///
/// `year_start` anchors the linear pace expectation for count goals: the
/// expected progress fraction is days elapsed since `year_start` over days
/// from `year_start` to the due date.
pub fn classify(
    goal: &Goal,
    today: NaiveDate,
    year_start: NaiveDate,
    config: &ClassifierConfig,
) -> GoalStatus {
    if goal.kind == GoalKind::Milestone {
        return classify_milestone_goal(goal, today);
    }

    if goal.completed {
        return GoalStatus::Completed;
    }

    let days_until_due = (goal.due_date - today).num_days();
    if days_until_due < 0 {
        return GoalStatus::Overdue;
    }
    if days_until_due <= config.due_soon_days {
        return GoalStatus::DueSoon;
    }

    // Pace comparison applies to count goals only; binary-style goals
    // (target <= 1) can never be "behind"
    if goal.target_value > 1.0 {
        let progress_percent = goal.current_value / goal.target_value * 100.0;
        let total_days = (goal.due_date - year_start).num_days();
        let days_elapsed = (today - year_start).num_days();
        let expected_percent = if total_days > 0 {
            days_elapsed as f64 / total_days as f64 * 100.0
        } else {
            0.0
        };

        if progress_percent < expected_percent * config.behind_ratio {
            return GoalStatus::Behind;
        }
    }

    GoalStatus::OnTrack
}

/// Milestone-kind goals carry their expected checkpoint value in
/// `target_value` and use the two-state met/behind variant.
fn classify_milestone_goal(goal: &Goal, today: NaiveDate) -> GoalStatus {
    if goal.completed || goal.current_value >= goal.target_value {
        return GoalStatus::MilestoneMet;
    }
    if goal.due_date < today {
        return GoalStatus::MilestoneBehind;
    }
    GoalStatus::OnTrack
}

/// Classify a standalone checkpoint against the parent goal's current value
pub fn classify_milestone(
    milestone: &Milestone,
    current_value: f64,
    today: NaiveDate,
) -> GoalStatus {
    if current_value >= milestone.expected_value {
        return GoalStatus::MilestoneMet;
    }
    if milestone.due_date < today {
        return GoalStatus::MilestoneBehind;
    }
    GoalStatus::OnTrack
}

/// Rounded progress percentage for display.
///
/// Zero-target goals are binary: 100 when completed, otherwise 0.
pub fn progress_percent(goal: &Goal) -> u32 {
    if goal.target_value > 0.0 {
        (goal.current_value / goal.target_value * 100.0).round() as u32
    } else if goal.completed {
        100
    } else {
        0
    }
}

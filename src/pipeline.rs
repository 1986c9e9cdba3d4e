//! Pipeline orchestration
//!
//! Public entry points that take raw REST-shaped records through boundary
//! validation, aggregation, and classification to summaries and reports.
//! Every entry point takes the reference date explicitly; nothing in here
//! reads the clock.

use crate::aggregate::{date_window, day_of_week_rates, week_start, weekly_completion};
use crate::climbing::comparisons::{all_comparisons, DEFAULT_BODY_WEIGHT_LBS};
use crate::climbing::stats::{
    average_grade, flash_rate, grade_distribution, max_grade, send_rate, session_totals,
};
use crate::climbing::types::ClimbSession;
use crate::error::StatsError;
use crate::report::ReportEncoder;
use crate::schema::raw_record::RawActivityBatch;
use crate::schema::RecordAdapter;
use crate::scoring::{score_history, Frequency};
use crate::status::{classify, progress_percent, ClassifierConfig};
use crate::streak::{current_streak, longest_streak};
use crate::types::{
    ClimbingSummary, CompletionRecord, Goal, GoalStatusEntry, GoalSummary, HabitSummary,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};

/// Summarize habit completion records against a reference date.
///
/// `habit_count` scales the "possible" denominators; pass the number of
/// habits being tracked, which may exceed the habits present in `records`.
/// Supplying a `frequency` additionally computes the strength score over
/// the span from the earliest record through `today`.
pub fn habit_summary(
    records: &[CompletionRecord],
    habit_count: u32,
    today: NaiveDate,
    frequency: Option<Frequency>,
) -> Result<HabitSummary, StatsError> {
    let completion_dates: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();

    let window = match records.iter().map(|r| r.date).min() {
        Some(first) if first <= today => date_window(first, today),
        _ => Vec::new(),
    };

    let strength_score = match frequency {
        Some(freq) if !window.is_empty() => {
            let completions: BTreeMap<NaiveDate, bool> = completion_dates
                .iter()
                .map(|&date| (date, true))
                .collect();
            let points = score_history(freq, &completions, window[0], today)?;
            points.last().map(|p| p.score)
        }
        _ => None,
    };

    Ok(HabitSummary {
        current_streak: current_streak(&completion_dates, today),
        longest_streak: longest_streak(&completion_dates),
        total_completions: records.iter().filter(|r| r.completed).count() as u32,
        weekly: weekly_completion(records, habit_count, week_start(today)),
        day_of_week: day_of_week_rates(&window, records, habit_count).to_vec(),
        strength_score,
    })
}

/// Classify every goal and count statuses
pub fn goal_summary(
    goals: &[Goal],
    today: NaiveDate,
    year_start: NaiveDate,
    config: &ClassifierConfig,
) -> GoalSummary {
    let entries: Vec<GoalStatusEntry> = goals
        .iter()
        .map(|goal| GoalStatusEntry {
            id: goal.id,
            title: goal.title.clone(),
            status: classify(goal, today, year_start, config),
            progress_percent: progress_percent(goal),
        })
        .collect();

    let mut counts = BTreeMap::new();
    for entry in &entries {
        *counts.entry(entry.status.as_str().to_string()).or_insert(0) += 1;
    }

    GoalSummary {
        goals: entries,
        counts,
    }
}

/// Aggregate climbing sessions into the dashboard summary
pub fn climbing_summary(sessions: &[ClimbSession], body_weight_lbs: Option<f64>) -> ClimbingSummary {
    let totals = session_totals(sessions);
    let all_climbs: Vec<_> = sessions
        .iter()
        .flat_map(|s| s.climbs.iter().cloned())
        .collect();

    let distribution: BTreeMap<String, u32> = grade_distribution(sessions).into_iter().collect();

    ClimbingSummary {
        total_sessions: totals.sessions,
        problems_attempted: totals.problems_attempted,
        problems_sent: totals.problems_sent,
        total_attempts: totals.total_attempts,
        total_minutes: totals.total_minutes,
        send_rate: send_rate(totals.problems_sent, totals.problems_attempted),
        flash_rate: flash_rate(&all_climbs),
        max_grade: max_grade(sessions),
        average_grade: average_grade(sessions),
        grade_distribution: distribution,
        absurd: all_comparisons(
            totals.total_attempts,
            totals.problems_sent,
            totals.total_minutes,
            body_weight_lbs.unwrap_or(DEFAULT_BODY_WEIGHT_LBS),
        ),
    }
}

/// Build a full dashboard report JSON from a raw activity batch.
///
/// Convenience wrapper over [`StatsEngine`] with default configuration.
pub fn dashboard_report_json(
    batch_json: &str,
    today: NaiveDate,
    computed_at: DateTime<Utc>,
) -> Result<String, StatsError> {
    StatsEngine::new().dashboard_from_json(batch_json, today, computed_at)
}

/// Stateful orchestrator holding classifier configuration and the report
/// encoder. Use this when producing many reports with consistent settings
/// or a fixed instance id.
pub struct StatsEngine {
    config: ClassifierConfig,
    encoder: ReportEncoder,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsEngine {
    /// Create an engine with default thresholds
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an engine with custom classifier thresholds
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            encoder: ReportEncoder::new(),
        }
    }

    /// Pin the report instance id, for reproducible output
    pub fn with_instance_id(mut self, instance_id: String) -> Self {
        self.encoder = ReportEncoder::with_instance_id(instance_id);
        self
    }

    /// Process a raw activity batch into a report payload JSON.
    ///
    /// Sections absent from the batch are omitted from the report rather
    /// than rendered as zeros.
    pub fn dashboard_from_json(
        &self,
        batch_json: &str,
        today: NaiveDate,
        computed_at: DateTime<Utc>,
    ) -> Result<String, StatsError> {
        let batch: RawActivityBatch = serde_json::from_str(batch_json)?;
        self.dashboard_from_batch(&batch, today, computed_at)
    }

    /// Process an already-parsed batch into a report payload JSON
    pub fn dashboard_from_batch(
        &self,
        batch: &RawActivityBatch,
        today: NaiveDate,
        computed_at: DateTime<Utc>,
    ) -> Result<String, StatsError> {
        let habits = if batch.habit_logs.is_empty() {
            None
        } else {
            let records = RecordAdapter::habit_logs(&batch.habit_logs)?;
            let habit_count = batch.habit_count.unwrap_or_else(|| {
                records
                    .iter()
                    .map(|r| r.habit_id)
                    .collect::<HashSet<_>>()
                    .len() as u32
            });
            Some(habit_summary(&records, habit_count, today, None)?)
        };

        let goals = if batch.goals.is_empty() {
            None
        } else {
            let goals = RecordAdapter::goals(&batch.goals)?;
            // Pace expectations anchor at January 1 of the reference year
            let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            Some(goal_summary(&goals, today, year_start, &self.config))
        };

        let climbing = if batch.climb_sessions.is_empty() {
            None
        } else {
            let sessions = RecordAdapter::climb_sessions(&batch.climb_sessions)?;
            Some(climbing_summary(&sessions, batch.body_weight_lbs))
        };

        self.encoder
            .encode_to_json(habits, goals, climbing, today, computed_at)
    }
}

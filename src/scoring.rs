//! Habit strength scoring
//!
//! Exponential-decay strength score adapted from the uHabits model. The
//! score drifts toward 1.0 with consistent completions and decays gently on
//! misses, so a long streak survives an off day. Habits with lower target
//! frequency decay slower.

use crate::error::StatsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calibration constant for the decay rate. Empirically tuned so daily
/// habits lose roughly 5% per missed day.
const DECAY_CALIBRATION: f64 = 13.0;

/// Habit target frequency as "numerator times per denominator days"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    numerator: u32,
    denominator: u32,
}

impl Frequency {
    /// Once per day
    pub const DAILY: Frequency = Frequency {
        numerator: 1,
        denominator: 1,
    };

    /// Once per week
    pub const WEEKLY: Frequency = Frequency {
        numerator: 1,
        denominator: 7,
    };

    /// Build a validated frequency.
    ///
    /// Both parts must be positive, the numerator cannot exceed the
    /// denominator (no more than once per day), and neither may exceed 365.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, StatsError> {
        if numerator == 0 || denominator == 0 {
            return Err(StatsError::InvalidFrequency(
                "numerator and denominator must be positive".to_string(),
            ));
        }
        if numerator > denominator {
            return Err(StatsError::InvalidFrequency(format!(
                "{numerator} times per {denominator} days exceeds once per day"
            )));
        }
        if denominator > 365 {
            return Err(StatsError::InvalidFrequency(format!(
                "denominator {denominator} exceeds the yearly limit"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// N times per week
    pub fn times_per_week(times: u32) -> Result<Self, StatsError> {
        Self::new(times, 7)
    }

    /// Decimal representation used by the scoring formula
    /// (1.0 = daily, ~0.143 = weekly)
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// One point in a habit's score history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: f64,
    pub completed: bool,
}

/// Advance a strength score by one day.
///
/// `frequency` is the decimal habit frequency and must be positive and
/// finite; `previous_score` is clamped into [0, 1]. The result approaches
/// 1.0 asymptotically and never reaches it.
pub fn habit_score(
    frequency: f64,
    previous_score: f64,
    completed: bool,
) -> Result<f64, StatsError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(StatsError::InvalidFrequency(format!(
            "{frequency} is not a positive finite number"
        )));
    }
    if !previous_score.is_finite() {
        return Err(StatsError::InvalidRecord(format!(
            "previous score {previous_score} is not finite"
        )));
    }

    let previous = previous_score.clamp(0.0, 1.0);
    let multiplier = 0.5_f64.powf(frequency.sqrt() / DECAY_CALIBRATION);
    let checkmark = if completed { 1.0 } else { 0.0 };

    Ok(previous * multiplier + checkmark * (1.0 - multiplier))
}

/// Fold a habit's score day by day across an inclusive date range.
///
/// Days absent from `completions` count as misses. Errors when
/// `start > end`.
pub fn score_history(
    frequency: Frequency,
    completions: &BTreeMap<NaiveDate, bool>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ScorePoint>, StatsError> {
    if start > end {
        return Err(StatsError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }

    let decimal = frequency.as_decimal();
    let mut points = Vec::new();
    let mut score = 0.0;
    let mut day = start;

    loop {
        let completed = completions.get(&day).copied().unwrap_or(false);
        score = habit_score(decimal, score, completed)?;
        points.push(ScorePoint {
            date: day,
            score,
            completed,
        });

        if day == end {
            break;
        }
        day = day
            .succ_opt()
            .ok_or_else(|| StatsError::InvalidRange("date overflow".to_string()))?;
    }

    Ok(points)
}

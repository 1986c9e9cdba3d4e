//! Session aggregation
//!
//! Folds climbing sessions into the numbers the dashboard shows: grade
//! distribution, send and flash rates, max and average grades, and
//! per-session totals. Only sent climbs count toward grade stats.

use super::grades::{grade_to_numeric, numeric_to_grade};
use super::types::{ClimbRecord, ClimbSession};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count of sends per grade across all sessions. Unsent climbs are
/// excluded entirely.
pub fn grade_distribution(sessions: &[ClimbSession]) -> HashMap<String, u32> {
    let mut distribution = HashMap::new();
    for session in sessions {
        for climb in &session.climbs {
            if climb.sent {
                *distribution.entry(climb.grade.clone()).or_insert(0) += 1;
            }
        }
    }
    distribution
}

/// Send rate as a percentage, capped at 100 to guard against bad data
/// where sends exceed attempts. Zero attempts yields 0.
pub fn send_rate(total_sends: u32, total_attempts: u32) -> f64 {
    if total_attempts == 0 {
        return 0.0;
    }
    (f64::from(total_sends) / f64::from(total_attempts) * 100.0).min(100.0)
}

/// Percentage of sends that were first-try, rounded to two decimals.
/// No sends yields 0.
pub fn flash_rate(climbs: &[ClimbRecord]) -> f64 {
    let sends = climbs.iter().filter(|c| c.sent).count();
    if sends == 0 {
        return 0.0;
    }
    let flashes = climbs.iter().filter(|c| c.is_flash()).count();
    (flashes as f64 / sends as f64 * 100.0 * 100.0).round() / 100.0
}

/// Hardest session max grade across all sessions. "V0" when nothing is
/// recorded.
pub fn max_grade(sessions: &[ClimbSession]) -> String {
    let max = sessions
        .iter()
        .filter_map(|s| s.max_grade.as_deref())
        .map(grade_to_numeric)
        .max()
        .unwrap_or(0);
    numeric_to_grade(i32::from(max))
}

/// Mean numeric grade across sent climbs, rounded back to a grade string.
/// "V0" when nothing was sent.
pub fn average_grade(sessions: &[ClimbSession]) -> String {
    let mut sum = 0u32;
    let mut count = 0u32;
    for session in sessions {
        for climb in &session.climbs {
            if climb.sent {
                sum += u32::from(grade_to_numeric(&climb.grade));
                count += 1;
            }
        }
    }

    if count == 0 {
        return "V0".to_string();
    }
    let avg = (f64::from(sum) / f64::from(count)).round() as i32;
    numeric_to_grade(avg)
}

/// Totals accumulated across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub sessions: u32,
    /// Distinct problems tried
    pub problems_attempted: u32,
    /// Distinct problems sent
    pub problems_sent: u32,
    /// Individual tries summed over every problem
    pub total_attempts: u32,
    /// Minutes on the board, summed over sessions with a recorded duration
    pub total_minutes: u32,
}

pub fn session_totals(sessions: &[ClimbSession]) -> SessionTotals {
    let mut totals = SessionTotals {
        sessions: sessions.len() as u32,
        ..SessionTotals::default()
    };

    for session in sessions {
        totals.problems_attempted += session.climbs.len() as u32;
        totals.problems_sent += session.climbs.iter().filter(|c| c.sent).count() as u32;
        totals.total_attempts += session.climbs.iter().map(|c| c.attempts).sum::<u32>();
        totals.total_minutes += session.duration_minutes.unwrap_or(0);
    }

    totals
}

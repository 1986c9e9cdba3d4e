//! Climbing session types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One problem attempted during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimbRecord {
    /// V-grade string as recorded ("V4", "V12+", "V5/6")
    pub grade: String,
    /// Number of tries on this problem, at least 1
    pub attempts: u32,
    pub sent: bool,
}

impl ClimbRecord {
    /// A flash is a send on the first attempt
    pub fn is_flash(&self) -> bool {
        self.sent && self.attempts == 1
    }
}

/// One board session with its attempted problems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimbSession {
    pub date: NaiveDate,
    pub duration_minutes: Option<u32>,
    /// Hardest grade reached in the session, as recorded by the board
    pub max_grade: Option<String>,
    pub climbs: Vec<ClimbRecord>,
}

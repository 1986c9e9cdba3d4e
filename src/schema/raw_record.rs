//! goalconnect.activity.v1 schema definition
//!
//! Wire-shaped input records as returned by the REST endpoints: habit logs,
//! goals, goal progress entries, and Kilter Board climbing sessions. Dates
//! are ISO-8601 "YYYY-MM-DD" strings; field names are camelCase.

use crate::error::StatsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current input schema version
pub const SCHEMA_VERSION: &str = "goalconnect.activity.v1";

/// Parse an ISO-8601 calendar date, failing fast on anything malformed
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, StatsError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| StatsError::DateParseError(format!("'{value}' is not a YYYY-MM-DD date")))
}

/// One habit-log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHabitLog {
    pub habit_id: i64,
    pub date: String,
    pub completed: bool,
}

impl RawHabitLog {
    pub fn validate(&self) -> Result<(), StatsError> {
        parse_date(&self.date)?;
        Ok(())
    }
}

/// One goal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGoal {
    pub id: i64,
    pub title: String,
    pub current_value: f64,
    pub target_value: f64,
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    /// "count", "binary", or "milestone"; unknown values fall back to count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
}

impl RawGoal {
    pub fn validate(&self) -> Result<(), StatsError> {
        parse_date(&self.due_date)?;
        if !self.current_value.is_finite() || self.current_value < 0.0 {
            return Err(StatsError::InvalidRecord(format!(
                "goal {}: currentValue {} must be a non-negative number",
                self.id, self.current_value
            )));
        }
        if !self.target_value.is_finite() || self.target_value < 0.0 {
            return Err(StatsError::InvalidRecord(format!(
                "goal {}: targetValue {} must be a non-negative number",
                self.id, self.target_value
            )));
        }
        Ok(())
    }
}

/// One incremental goal progress entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgressEntry {
    pub goal_id: i64,
    pub date: String,
    pub value: f64,
}

impl RawProgressEntry {
    pub fn validate(&self) -> Result<(), StatsError> {
        parse_date(&self.date)?;
        if !self.value.is_finite() {
            return Err(StatsError::InvalidRecord(format!(
                "progress entry for goal {}: value {} is not finite",
                self.goal_id, self.value
            )));
        }
        Ok(())
    }
}

fn default_attempts() -> u32 {
    1
}

/// One problem within a climbing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClimb {
    pub grade: String,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    pub sent: bool,
}

impl RawClimb {
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.attempts == 0 {
            return Err(StatsError::InvalidRecord(format!(
                "climb '{}': attempts must be at least 1",
                self.grade
            )));
        }
        Ok(())
    }
}

/// One Kilter Board session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClimbSession {
    pub session_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_grade: Option<String>,
    #[serde(default)]
    pub climbs: Vec<RawClimb>,
}

impl RawClimbSession {
    pub fn validate(&self) -> Result<(), StatsError> {
        parse_date(&self.session_date)?;
        for climb in &self.climbs {
            climb.validate()?;
        }
        Ok(())
    }
}

/// Everything the dashboard needs in one payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityBatch {
    #[serde(default)]
    pub habit_logs: Vec<RawHabitLog>,
    #[serde(default)]
    pub goals: Vec<RawGoal>,
    #[serde(default)]
    pub progress: Vec<RawProgressEntry>,
    #[serde(default)]
    pub climb_sessions: Vec<RawClimbSession>,
    /// Number of tracked habits; defaults to the distinct habit ids seen in
    /// the logs when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habit_count: Option<u32>,
    /// Body weight used by the weight-based comparisons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_weight_lbs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_log_roundtrip() {
        let json = r#"{"habitId": 3, "date": "2024-03-15", "completed": true}"#;
        let log: RawHabitLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.habit_id, 3);
        assert!(log.validate().is_ok());

        let back = serde_json::to_value(&log).unwrap();
        assert_eq!(back["habitId"], 3);
        assert_eq!(back["date"], "2024-03-15");
    }

    #[test]
    fn test_habit_log_rejects_bad_date() {
        let log = RawHabitLog {
            habit_id: 1,
            date: "03/15/2024".to_string(),
            completed: true,
        };
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_goal_defaults_and_validation() {
        let json = r#"{
            "id": 7,
            "title": "Climb 200 problems",
            "currentValue": 48,
            "targetValue": 200,
            "dueDate": "2024-12-31"
        }"#;
        let goal: RawGoal = serde_json::from_str(json).unwrap();
        assert!(!goal.completed);
        assert!(goal.goal_type.is_none());
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_goal_rejects_negative_target() {
        let goal = RawGoal {
            id: 1,
            title: "Bad".to_string(),
            current_value: 0.0,
            target_value: -5.0,
            due_date: "2024-12-31".to_string(),
            completed: false,
            goal_type: None,
        };
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_climb_defaults_attempts() {
        let json = r#"{"grade": "V4", "sent": true}"#;
        let climb: RawClimb = serde_json::from_str(json).unwrap();
        assert_eq!(climb.attempts, 1);
        assert!(climb.validate().is_ok());
    }

    #[test]
    fn test_session_validates_nested_climbs() {
        let session = RawClimbSession {
            session_date: "2024-03-15".to_string(),
            duration_minutes: Some(90),
            max_grade: Some("V6".to_string()),
            climbs: vec![RawClimb {
                grade: "V4".to_string(),
                attempts: 0,
                sent: false,
            }],
        };
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_batch_sections_default_empty() {
        let batch: RawActivityBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.habit_logs.is_empty());
        assert!(batch.goals.is_empty());
        assert!(batch.progress.is_empty());
        assert!(batch.climb_sessions.is_empty());
    }
}

//! Boundary conversion from raw wire records to typed records
//!
//! All date parsing and shape checking happens here; downstream modules
//! only ever see validated `NaiveDate`s and finite numbers.

use crate::climbing::types::{ClimbRecord, ClimbSession};
use crate::error::StatsError;
use crate::schema::raw_record::{
    parse_date, RawActivityBatch, RawClimbSession, RawGoal, RawHabitLog, RawProgressEntry,
};
use crate::types::{CompletionRecord, Goal, GoalKind, ProgressRecord};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Converter for raw REST-shaped records
pub struct RecordAdapter;

impl RecordAdapter {
    /// Parse a JSON array of records
    pub fn parse_array<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, StatsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse newline-delimited JSON, one record per line
    pub fn parse_ndjson<T: DeserializeOwned>(ndjson: &str) -> Result<Vec<T>, StatsError> {
        let mut records = Vec::new();
        for line in ndjson.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            records.push(serde_json::from_str(trimmed)?);
        }
        Ok(records)
    }

    /// Convert habit logs, collapsing duplicate (habit, date) pairs.
    ///
    /// When duplicates disagree, completed wins: a later un-completed sync
    /// row cannot erase a completion. Output is sorted by (habit, date).
    pub fn habit_logs(raw: &[RawHabitLog]) -> Result<Vec<CompletionRecord>, StatsError> {
        let mut by_key: BTreeMap<(i64, chrono::NaiveDate), bool> = BTreeMap::new();
        for log in raw {
            let date = parse_date(&log.date)?;
            let entry = by_key.entry((log.habit_id, date)).or_insert(false);
            *entry |= log.completed;
        }

        Ok(by_key
            .into_iter()
            .map(|((habit_id, date), completed)| CompletionRecord {
                habit_id,
                date,
                completed,
            })
            .collect())
    }

    /// Convert goals, mapping the wire goalType onto a kind.
    ///
    /// Unknown type strings fall back to count so that new server-side
    /// types degrade gracefully instead of failing the whole batch.
    pub fn goals(raw: &[RawGoal]) -> Result<Vec<Goal>, StatsError> {
        raw.iter()
            .map(|goal| {
                goal.validate()?;
                let kind = match goal.goal_type.as_deref() {
                    Some("milestone") => GoalKind::Milestone,
                    Some("binary") => GoalKind::Binary,
                    _ => GoalKind::Count,
                };
                Ok(Goal {
                    id: goal.id,
                    title: goal.title.clone(),
                    current_value: goal.current_value,
                    target_value: goal.target_value,
                    due_date: parse_date(&goal.due_date)?,
                    completed: goal.completed,
                    kind,
                })
            })
            .collect()
    }

    /// Convert progress entries
    pub fn progress(raw: &[RawProgressEntry]) -> Result<Vec<ProgressRecord>, StatsError> {
        raw.iter()
            .map(|entry| {
                entry.validate()?;
                Ok(ProgressRecord {
                    goal_id: entry.goal_id,
                    date: parse_date(&entry.date)?,
                    value: entry.value,
                })
            })
            .collect()
    }

    /// Convert climbing sessions with their nested climbs
    pub fn climb_sessions(raw: &[RawClimbSession]) -> Result<Vec<ClimbSession>, StatsError> {
        raw.iter()
            .map(|session| {
                session.validate()?;
                Ok(ClimbSession {
                    date: parse_date(&session.session_date)?,
                    duration_minutes: session.duration_minutes,
                    max_grade: session.max_grade.clone(),
                    climbs: session
                        .climbs
                        .iter()
                        .map(|climb| ClimbRecord {
                            grade: climb.grade.clone(),
                            attempts: climb.attempts,
                            sent: climb.sent,
                        })
                        .collect(),
                })
            })
            .collect()
    }

    /// Validate every record in a batch without converting, collecting one
    /// issue per failing record
    pub fn validate_batch(batch: &RawActivityBatch) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (index, log) in batch.habit_logs.iter().enumerate() {
            if let Err(error) = log.validate() {
                issues.push(ValidationIssue {
                    section: "habitLogs",
                    index,
                    error: error.to_string(),
                });
            }
        }
        for (index, goal) in batch.goals.iter().enumerate() {
            if let Err(error) = goal.validate() {
                issues.push(ValidationIssue {
                    section: "goals",
                    index,
                    error: error.to_string(),
                });
            }
        }
        for (index, entry) in batch.progress.iter().enumerate() {
            if let Err(error) = entry.validate() {
                issues.push(ValidationIssue {
                    section: "progress",
                    index,
                    error: error.to_string(),
                });
            }
        }
        for (index, session) in batch.climb_sessions.iter().enumerate() {
            if let Err(error) = session.validate() {
                issues.push(ValidationIssue {
                    section: "climbSessions",
                    index,
                    error: error.to_string(),
                });
            }
        }

        issues
    }
}

/// One record that failed batch validation
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub section: &'static str,
    pub index: usize,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw_log(habit_id: i64, date: &str, completed: bool) -> RawHabitLog {
        RawHabitLog {
            habit_id,
            date: date.to_string(),
            completed,
        }
    }

    #[test]
    fn test_habit_logs_dedup_completed_wins() {
        let raw = vec![
            raw_log(1, "2024-03-15", true),
            raw_log(1, "2024-03-15", false),
            raw_log(1, "2024-03-14", false),
            raw_log(2, "2024-03-15", false),
        ];

        let records = RecordAdapter::habit_logs(&raw).unwrap();
        assert_eq!(records.len(), 3);

        let todays: Vec<_> = records
            .iter()
            .filter(|r| r.date == date(2024, 3, 15))
            .collect();
        assert_eq!(todays.len(), 2);
        assert!(todays.iter().find(|r| r.habit_id == 1).unwrap().completed);
        assert!(!todays.iter().find(|r| r.habit_id == 2).unwrap().completed);
    }

    #[test]
    fn test_habit_logs_reject_malformed_date() {
        let raw = vec![raw_log(1, "not-a-date", true)];
        assert!(RecordAdapter::habit_logs(&raw).is_err());
    }

    #[test]
    fn test_goals_kind_mapping() {
        let raw = vec![
            RawGoal {
                id: 1,
                title: "Read".to_string(),
                current_value: 5.0,
                target_value: 24.0,
                due_date: "2024-12-31".to_string(),
                completed: false,
                goal_type: None,
            },
            RawGoal {
                id: 2,
                title: "Checkpoint".to_string(),
                current_value: 5.0,
                target_value: 6.0,
                due_date: "2024-06-30".to_string(),
                completed: false,
                goal_type: Some("milestone".to_string()),
            },
            RawGoal {
                id: 3,
                title: "Future type".to_string(),
                current_value: 0.0,
                target_value: 1.0,
                due_date: "2024-06-30".to_string(),
                completed: false,
                goal_type: Some("compound".to_string()),
            },
        ];

        let goals = RecordAdapter::goals(&raw).unwrap();
        assert_eq!(goals[0].kind, GoalKind::Count);
        assert_eq!(goals[1].kind, GoalKind::Milestone);
        assert_eq!(goals[2].kind, GoalKind::Count);
        assert_eq!(goals[0].due_date, date(2024, 12, 31));
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let ndjson = r#"
{"habitId": 1, "date": "2024-03-15", "completed": true}

{"habitId": 2, "date": "2024-03-15", "completed": false}
"#;
        let logs: Vec<RawHabitLog> = RecordAdapter::parse_ndjson(ndjson).unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[{"habitId": 1, "date": "2024-03-15", "completed": true}]"#;
        let logs: Vec<RawHabitLog> = RecordAdapter::parse_array(json).unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_validate_batch_collects_issues() {
        let batch = RawActivityBatch {
            habit_logs: vec![raw_log(1, "bad-date", true), raw_log(2, "2024-03-15", true)],
            goals: vec![RawGoal {
                id: 1,
                title: "Bad".to_string(),
                current_value: f64::NAN,
                target_value: 10.0,
                due_date: "2024-12-31".to_string(),
                completed: false,
                goal_type: None,
            }],
            ..RawActivityBatch::default()
        };

        let issues = RecordAdapter::validate_batch(&batch);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].section, "habitLogs");
        assert_eq!(issues[0].index, 0);
        assert_eq!(issues[1].section, "goals");
    }
}

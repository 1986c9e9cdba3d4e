//! Dashboard report encoding
//!
//! Assembles the per-domain summaries into a versioned report payload with
//! producer metadata. The reference date and computation timestamp are both
//! explicit inputs; with a fixed instance id the encoded output is
//! byte-identical across runs.

use crate::error::StatsError;
use crate::types::{
    ClimbingSummary, DashboardReport, GoalSummary, HabitSummary, ReportProducer,
};
use crate::{PRODUCER_NAME, STATS_VERSION};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Current report payload version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for dashboard report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a unique instance id
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a fixed instance id, for reproducible output
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Assemble a report from the summaries that were computed
    pub fn encode(
        &self,
        habits: Option<HabitSummary>,
        goals: Option<GoalSummary>,
        climbing: Option<ClimbingSummary>,
        generated_for: NaiveDate,
        computed_at: DateTime<Utc>,
    ) -> DashboardReport {
        DashboardReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: STATS_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_for,
            computed_at_utc: computed_at.to_rfc3339(),
            habits,
            goals,
            climbing,
        }
    }

    /// Encode straight to pretty-printed JSON
    pub fn encode_to_json(
        &self,
        habits: Option<HabitSummary>,
        goals: Option<GoalSummary>,
        climbing: Option<ClimbingSummary>,
        generated_for: NaiveDate,
        computed_at: DateTime<Utc>,
    ) -> Result<String, StatsError> {
        let report = self.encode(habits, goals, climbing, generated_for, computed_at);
        serde_json::to_string_pretty(&report).map_err(StatsError::JsonError)
    }
}

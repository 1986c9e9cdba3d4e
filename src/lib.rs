//! GoalConnect Stats - activity aggregation and status engine
//!
//! Turns raw REST-shaped activity records into derived dashboard values
//! through a deterministic pipeline: boundary validation → aggregation →
//! classification → report encoding.
//!
//! ## Modules
//!
//! - **Habits**: completion streaks, weekly and weekday rates, strength score
//! - **Goals**: status classification against deadline and linear pace
//! - **Climbing**: grade normalization, session stats, absurd comparisons
//!
//! Every computation is a pure function of its inputs; the reference date
//! ("today") is always passed in explicitly rather than read from the clock,
//! so identical inputs produce identical outputs.

pub mod aggregate;
pub mod climbing;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod status;
pub mod streak;
pub mod types;
pub mod units;

pub use error::StatsError;
pub use pipeline::{dashboard_report_json, StatsEngine};
pub use report::{ReportEncoder, REPORT_VERSION};
pub use schema::{RecordAdapter, SCHEMA_VERSION};
pub use status::{classify, classify_milestone, ClassifierConfig};
pub use streak::{current_streak, longest_streak};

/// Engine version embedded in all report payloads
pub const STATS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "goalconnect-stats";

//! Climbing session statistics
//!
//! Aggregates Kilter Board style session data: V-grade normalization,
//! send/flash rates, grade distributions, and the absurd-comparison
//! conversions shown on the dashboard.

pub mod comparisons;
pub mod grades;
pub mod stats;
pub mod types;

pub use comparisons::{all_comparisons, format_comparison, ComparisonSet};
pub use grades::{grade_to_numeric, numeric_to_grade};
pub use stats::{flash_rate, grade_distribution, send_rate};
pub use types::{ClimbRecord, ClimbSession};

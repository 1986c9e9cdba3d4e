//! Input schema and boundary validation
//!
//! Raw records arrive shaped like the REST API's JSON (camelCase fields,
//! ISO-8601 date strings). This module validates them at the boundary and
//! converts them to the typed records the rest of the engine consumes, so
//! malformed dates and out-of-range numbers never reach aggregation logic.

pub mod adapter;
pub mod raw_record;

pub use adapter::{RecordAdapter, ValidationIssue};
pub use raw_record::{
    RawActivityBatch, RawClimb, RawClimbSession, RawGoal, RawHabitLog, RawProgressEntry,
    SCHEMA_VERSION,
};

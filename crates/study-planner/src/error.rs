//! Error types for study-planner operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Invalid availability window: {0}")]
    InvalidWindow(String),

    #[error("Invalid weekday index {0} (expected 0=Sunday..6=Saturday)")]
    InvalidWeekday(u8),

    #[error("Invalid session length: {0} minutes (expected 1..=1440)")]
    InvalidSessionLength(u32),

    #[error("Invalid target hours for test '{test_id}': {value}")]
    InvalidTargetHours { test_id: String, value: f64 },

    #[error("Invalid test date for test '{test_id}': '{value}'")]
    InvalidDate { test_id: String, value: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

//! Error types for the check-in aggregation engine

use thiserror::Error;

/// Errors raised by the date codec and aggregation functions.
///
/// Everything else in the engine is total: missing check-ins, empty
/// schedules and empty logs all have defined zero results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A date range whose start lies after its end
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// A date key that is not a real `YYYY-MM-DD` calendar day
    #[error("Invalid date key '{0}'. Expected YYYY-MM-DD")]
    InvalidDateKey(String),
}

/// Convenience Result type using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

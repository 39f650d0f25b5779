//! Crate-level error type for scheduling operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::repository::StoreError;

/// Convenient result alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A date range was constructed with `end` before `start`.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// An employee profile failed construction-time validation, or its
    /// registration collided with an existing name or alias.
    #[error("Invalid employee '{name}': {reason}")]
    InvalidEmployee { name: String, reason: String },

    /// A malformed generation request, such as a window that leaves the
    /// supported calendar range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The day selector found nobody to schedule, even relaxed. Aborts the
    /// current generation attempt; the generator moves on to the next one.
    #[error("Cannot schedule day {0}: no employees available")]
    CannotScheduleDay(NaiveDate),

    /// Persistence failure surfaced by the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert() {
        let err: SchedulerError = StoreError::UnknownEmployee("17".into()).into();
        assert!(matches!(err, SchedulerError::Store(_)));
        assert!(err.to_string().contains("Unknown employee"));
    }

    #[test]
    fn messages_carry_context() {
        let err = SchedulerError::InvalidEmployee {
            name: "Noa".into(),
            reason: "alias 'n' already registered".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid employee 'Noa': alias 'n' already registered"
        );
    }
}

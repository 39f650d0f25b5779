//! Error types for store operations.

use chrono::NaiveDate;

use crate::models::EmployeeId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate schedule entry for employee {employee_id} on {date}")]
    DuplicateEntry {
        employee_id: EmployeeId,
        date: NaiveDate,
    },

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Internal(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::Internal(s.to_string())
    }
}

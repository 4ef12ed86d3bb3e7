use thiserror::Error;

use crate::domain::RangeError;

/// Any failure that aborts a refresh run.
///
/// Variants name the phase that failed; all of them are fatal.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Configuration error: {0}")]
    Config(#[from] RangeError),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Liveness check failed: {0}")]
    Ping(String),
    #[error("Read failed: {0}")]
    Read(String),
    #[error("Update failed for product {id}: {reason}")]
    Write { id: String, reason: String },
}

impl RefreshError {
    pub fn write(id: impl ToString, reason: impl ToString) -> Self {
        RefreshError::Write {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

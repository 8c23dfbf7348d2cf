use std::path::PathBuf;

use thiserror::Error;

/// Failures a tracker operation can report back to the user. Every variant is raised before the
/// document is touched, so a failed command never writes.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),

    #[error("Not enough pills: tried to take {requested}, only {available} left")]
    InsufficientPills { requested: u32, available: u32 },

    #[error("Could not read data file {}: {reason}", path.display())]
    StoreRead { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

pub(crate) fn validation(message: impl Into<String>) -> TrackerError {
    TrackerError::Validation(message.into())
}

//! Error types for feed weight operations

use thiserror::Error;

/// Failure of the underlying key-value storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend is missing or refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Main error type for feed weight operations
#[derive(Error, Debug)]
pub enum WeightsError {
    /// Distribution failed validation; no mutation was made
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Writing the distribution to storage failed
    #[error("failed to persist feed weights: {0}")]
    PersistenceWriteFailed(#[source] StorageError),

    /// Stored record could not be read back
    #[error("stored feed weights are corrupt: {0}")]
    PersistenceReadCorrupt(String),

    /// Category name not recognised
    #[error("unknown feed category: {0}")]
    UnknownCategory(String),
}

impl WeightsError {
    /// Short machine-readable reason, used in boost reports
    pub fn reason(&self) -> &'static str {
        match self {
            WeightsError::InvalidDistribution(_) | WeightsError::UnknownCategory(_) => {
                "invalid-input"
            }
            WeightsError::PersistenceWriteFailed(_) => "persistence-write-failed",
            WeightsError::PersistenceReadCorrupt(_) => "persistence-read-corrupt",
        }
    }
}

/// Result alias for feed weight operations
pub type Result<T> = std::result::Result<T, WeightsError>;

use thiserror::Error;

/// Persisted or imported data that cannot be used.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected a JSON array of daily logs")]
    NotAnArray,

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// User-correctable problems with a log, in validation order.
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Data(DataError::Io(err))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(DataError::Parse(err))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cannot lock {}: {source}", path.display())]
    LockError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown target type: {0} (expected file, folder or both)")]
    InvalidTargetType(String),

    #[error("No per-user directory available for the tags file")]
    NoUserDir,
}

use tagdex_store::{StoreError, TagId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TagIndexError>;

#[derive(Error, Debug)]
pub enum TagIndexError {
    #[error("Tag not found: {0}")]
    NotFound(TagId),

    #[error("Tag already exists: {0}")]
    DuplicateId(TagId),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl TagIndexError {
    /// Stable machine-readable code for hosts.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::DuplicateId(_) => "duplicate_id",
            Self::Storage(_) => "storage",
        }
    }
}

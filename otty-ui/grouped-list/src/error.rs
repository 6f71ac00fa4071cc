use thiserror::Error;

/// Errors produced by [`GroupingList`](crate::GroupingList) queries and
/// rebuilds.
#[derive(Debug, Error)]
pub enum GroupingError {
    #[error("group {duplicate} repeats the key of group {first}")]
    DuplicateKey { first: usize, duplicate: usize },

    #[error("visible position {position} is out of range (len {len})")]
    OutOfRange { position: usize, len: usize },

    #[error("group key not found")]
    NotFound,

    #[error("expand state JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GroupingError>;

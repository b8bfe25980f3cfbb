use docket_types::BlobKey;
use thiserror::Error;

/// Errors produced by blob store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(BlobKey),

    #[error("blob key already written: {0}")]
    KeyExists(BlobKey),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type BlobResult<T> = Result<T, BlobError>;

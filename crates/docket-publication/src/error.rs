use docket_blob::BlobError;
use docket_files::FileError;
use docket_store::StoreError;
use docket_trigger::TriggerError;
use docket_types::ArtefactId;
use thiserror::Error;

/// Errors produced by publication lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublicationError {
    #[error("artefact not found: {0}")]
    NotFound(ArtefactId),

    /// The creation retry budget is spent; the caller may retry later.
    #[error("identity tuple still contended after {attempts} attempts")]
    Conflict { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Files(#[from] FileError),

    #[error(transparent)]
    Notify(#[from] TriggerError),
}

pub type PublicationResult<T> = Result<T, PublicationError>;

use docket_blob::BlobError;
use docket_files::FileError;
use docket_publication::PublicationError;
use docket_store::StoreError;
use docket_trigger::TriggerError;
use docket_types::ArtefactId;
use thiserror::Error;

/// Errors surfaced at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("artefact not found: {0}")]
    NotFound(ArtefactId),

    #[error(transparent)]
    Publication(#[from] PublicationError),

    #[error(transparent)]
    Files(#[from] FileError),

    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("runtime failure: {0}")]
    Runtime(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

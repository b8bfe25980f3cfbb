use docket_blob::BlobError;
use docket_types::ArtefactId;
use thiserror::Error;

use crate::keys::DerivedFileKind;

/// Errors produced by derived-file operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("no {kind} file stored for artefact {artefact_id}")]
    NotFound {
        artefact_id: ArtefactId,
        kind: DerivedFileKind,
    },

    #[error("caller is not authorised for this sensitivity")]
    Unauthorised,

    #[error("file is {actual} bytes, caller ceiling is {limit}")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

pub type FileResult<T> = Result<T, FileError>;

use docket_types::{ArtefactId, ArtefactIdentity};
use thiserror::Error;

/// Errors produced by artefact store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A different live artefact already owns this identity tuple. This is
    /// the unique-constraint signal the creation retry loop matches on.
    #[error("identity tuple already owned by a live artefact: {existing}")]
    IdentityConflict {
        identity: Box<ArtefactIdentity>,
        existing: ArtefactId,
    },

    #[error("artefact not found: {0}")]
    NotFound(ArtefactId),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

use docket_store::StoreError;
use thiserror::Error;

/// Errors produced by trigger evaluation and sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("subscription dispatch failed: {0}")]
    Dispatch(String),

    #[error("reporting dispatch failed: {0}")]
    Reporting(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TriggerResult<T> = Result<T, TriggerError>;

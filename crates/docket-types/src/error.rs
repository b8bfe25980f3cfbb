use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown {field} value: {value}")]
    UnknownValue { field: &'static str, value: String },
}

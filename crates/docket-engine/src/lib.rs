//! Composition root for the docket publication service.
//!
//! [`PublicationEngine`] constructs and owns every service — no global or
//! static state anywhere — from the injected store, blob, and collaborator
//! implementations. The synchronous request path (create, delete, archive,
//! fetch) runs services directly; the post-commit tail (derived-file
//! generation and trigger evaluation) is dispatched fire-and-forget on the
//! tokio runtime, after the row has committed. Tail failures are logged and
//! never affect the committed artefact; [`PublicationEngine::run_post_commit`]
//! re-runs the tail for any artefact at any time.

pub mod config;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use engine::PublicationEngine;
pub use error::{EngineError, EngineResult};

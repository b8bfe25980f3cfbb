//! Relational persistence boundary for docket artefact metadata.
//!
//! An artefact row lives in exactly one of two tables: **live** (visible to
//! dedup, display, and trigger queries) or **archive** (historical/MI
//! queries only). The store enforces the system's central invariant: at
//! most one live artefact per identity tuple, detected at `save` time as
//! [`StoreError::IdentityConflict`]. That conflict signal is the only
//! concurrency-control mechanism the creation retry loop consumes.
//!
//! Backends implement the [`ArtefactStore`] trait;
//! [`InMemoryArtefactStore`] is the `HashMap`-based backend for tests and
//! embedding.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryArtefactStore;
pub use traits::ArtefactStore;

//! Blob storage boundary for the docket publication service.
//!
//! Payloads and derived files live in blob storage, separate from the
//! relational artefact rows. Two instances of the same [`BlobStore`] trait
//! back the two concerns: payload storage (random, never-reused keys) and
//! derived-file storage (deterministic per-artefact keys).
//!
//! # Storage Backends
//!
//! - [`InMemoryBlobStore`] — `HashMap`-based store for tests and embedding
//! - [`FsBlobStore`] — one file per blob under a directory, with
//!   write-then-rename visibility
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written. `put` to an existing key is an
//!    error; updates always write a new key and delete the old one after
//!    the owning row has committed.
//! 2. `delete` is idempotent: deleting an absent key reports `false` and is
//!    not an error.
//! 3. The store never interprets blob contents.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{BlobError, BlobResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;

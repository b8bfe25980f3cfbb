//! Foundation types for the docket publication service.
//!
//! This crate provides the identity, classification, and record types used
//! throughout the docket system. Every other docket crate depends on
//! `docket-types`.
//!
//! # Key Types
//!
//! - [`ArtefactId`] — Stable identity of a published list document (UUID v7)
//! - [`LocationId`] — Resolved court/tribunal location, with a NoMatch sentinel
//! - [`BlobKey`] — Random, never-reused key into payload/derived-file storage
//! - [`ArtefactIdentity`] — The dedup tuple: at most one live artefact per tuple
//! - [`Artefact`] — One published list-document instance (metadata + payload ref)
//! - [`Caller`] — Identity of a retrieval caller for sensitivity gating

pub mod artefact;
pub mod caller;
pub mod error;
pub mod id;
pub mod listing;

pub use artefact::{Artefact, ArtefactIdentity};
pub use caller::{Caller, UserId};
pub use error::TypeError;
pub use id::{ArtefactId, BlobKey, LocationId};
pub use listing::{Language, ListType, Provenance, Sensitivity};

//! Derived-file lifecycle for the docket publication service.
//!
//! Non-flat-file artefacts get asynchronously rendered companions: a primary
//! PDF, an optional secondary-language PDF, and an optional spreadsheet.
//! Their blob keys are deterministic per artefact ([`derived_key`]), their
//! lifecycle is tied 1:1 to the parent artefact (regenerated on every
//! supersession, removed on delete/archive), and retrieval is gated by
//! sensitivity and a caller-supplied size ceiling.
//!
//! Rendering itself (per-list-type HTML/Excel formatting) lives behind the
//! [`FileGenerator`] collaborator; this crate owns when generation runs and
//! where the results go, not what they look like.

pub mod error;
pub mod generator;
pub mod keys;
pub mod service;

pub use error::{FileError, FileResult};
pub use generator::{FileGenerator, GeneratorTable, RenderedFiles};
pub use keys::{derived_key, DerivedFileKind};
pub use service::{AuthorizationCheck, FileManagementService, FilesConfig};

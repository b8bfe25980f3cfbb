//! Create-or-supersede orchestration for the docket publication service.
//!
//! This crate owns the hardest invariants in the system:
//!
//! - **Dual persistence**: an artefact is a DB row plus a payload blob, and
//!   any row a reader observes must have a resolvable payload. The creation
//!   path writes the blob first, commits the row, and only then deletes a
//!   superseded payload; failed attempts compensate their own blob.
//! - **One live artefact per identity tuple**: enforced by the store's
//!   unique-constraint signal and a bounded blind-retry loop — no
//!   pre-acquired locks. Two racing creations of the same tuple converge to
//!   one row; the loser's retry re-runs dedup and supersedes the winner.
//! - **Destructive ordering**: deletes and archives remove blobs before the
//!   row, so a mid-operation crash leaves at worst a dangling row (a safe
//!   "not found" on the next read), never an unreachable blob with a
//!   phantom owner.

pub mod create;
pub mod dedup;
pub mod delete;
pub mod error;
pub mod removal;

pub use create::{
    CreatedPublication, CreationConfig, CreationOutcome, PublicationCreationService,
    RetryCompensation,
};
pub use dedup::{DedupOutcome, DedupResolver};
pub use delete::PublicationDeleteService;
pub use error::{PublicationError, PublicationResult};
pub use removal::{LocationDirectory, PublicationRemovalService};

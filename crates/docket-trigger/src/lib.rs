//! Time-gated subscription fan-out for the docket publication service.
//!
//! An artefact becomes distributable once its display window opens. Two
//! independent paths evaluate the same predicate: the post-commit tail of
//! every creation/supersession, and a daily sweep over artefacts whose
//! window opens that day (covering lists ingested ahead of time that become
//! active purely from wall-clock advance). Both paths can fire on the same
//! day for the same artefact — delivery is at-least-once, and every notice
//! carries a per-artefact-per-day dedup key so downstream consumers can
//! drop repeats.
//!
//! NoMatch artefacts are never distributed; a separate periodic sweep
//! batches them up for operator reporting instead.

pub mod error;
pub mod notify;
pub mod service;

pub use error::{TriggerError, TriggerResult};
pub use notify::{BulkRemovalSummary, CreatedNotice, NoticeKey, ReportingClient, SubscriptionNotifier};
pub use service::ArtefactTriggerService;

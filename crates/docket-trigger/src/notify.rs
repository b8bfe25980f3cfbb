use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docket_types::{Artefact, ArtefactId, LocationId};

use crate::error::TriggerResult;

/// Dedup key for a creation notice: one per artefact per day.
///
/// Delivery is at-least-once (the post-commit path and the daily sweep can
/// both fire for the same artefact on the same day); consumers deduplicate
/// on this key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeKey {
    pub artefact_id: ArtefactId,
    pub day: NaiveDate,
}

/// A "publication is live" notice handed to the subscription collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNotice {
    pub key: NoticeKey,
    pub artefact: Artefact,
}

impl CreatedNotice {
    pub fn new(artefact: Artefact, day: NaiveDate) -> Self {
        Self {
            key: NoticeKey {
                artefact_id: artefact.artefact_id,
                day,
            },
            artefact,
        }
    }
}

/// Aggregate summary sent to admins after a bulk delete/archive, instead of
/// one notification per artefact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRemovalSummary {
    pub locations: Vec<LocationId>,
    pub deleted: Vec<ArtefactId>,
    pub archived: Vec<ArtefactId>,
}

impl BulkRemovalSummary {
    pub fn total(&self) -> usize {
        self.deleted.len() + self.archived.len()
    }
}

/// Downstream subscription fan-out.
pub trait SubscriptionNotifier: Send + Sync {
    fn notify_created(&self, notice: &CreatedNotice) -> TriggerResult<()>;
    fn notify_deleted(&self, artefact: &Artefact) -> TriggerResult<()>;
}

/// Operator-facing reporting collaborator.
pub trait ReportingClient: Send + Sync {
    fn report_no_match(&self, artefacts: &[Artefact]) -> TriggerResult<()>;
    fn notify_admins(&self, summary: &BulkRemovalSummary) -> TriggerResult<()>;
}

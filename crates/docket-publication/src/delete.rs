use std::sync::Arc;

use tracing::{debug, info};

use docket_blob::BlobStore;
use docket_files::FileManagementService;
use docket_store::ArtefactStore;
use docket_trigger::SubscriptionNotifier;
use docket_types::{Artefact, ArtefactId};

use crate::error::{PublicationError, PublicationResult};

/// Permanently removes a publication: payload blob, derived files, then the
/// row, then a deletion notice to third parties.
///
/// Blobs go before the row. A crash in between leaves a dangling row that
/// reads as "not found" on its next lookup; the reverse order could leave an
/// unreachable blob no row owns. There is no compensation when the blob
/// deletes succeed and the row operation then fails; the dangling row is
/// the accepted failure mode.
pub struct PublicationDeleteService {
    store: Arc<dyn ArtefactStore>,
    payload_blob: Arc<dyn BlobStore>,
    files: Arc<FileManagementService>,
    notifier: Arc<dyn SubscriptionNotifier>,
}

impl PublicationDeleteService {
    pub fn new(
        store: Arc<dyn ArtefactStore>,
        payload_blob: Arc<dyn BlobStore>,
        files: Arc<FileManagementService>,
        notifier: Arc<dyn SubscriptionNotifier>,
    ) -> Self {
        Self {
            store,
            payload_blob,
            files,
            notifier,
        }
    }

    /// Delete a publication and everything it owns.
    ///
    /// NoMatch artefacts were never distributed, so no deletion notice goes
    /// out for them. Returns the removed artefact.
    pub fn delete(&self, id: ArtefactId) -> PublicationResult<Artefact> {
        let artefact = self
            .store
            .find_by_id(id)?
            .ok_or(PublicationError::NotFound(id))?;

        self.remove_blobs(&artefact)?;
        self.store.delete(id)?;

        if artefact.location_id.is_no_match() {
            debug!(artefact = %id, "unresolved location, no deletion notice");
        } else {
            self.notifier.notify_deleted(&artefact)?;
        }
        info!(artefact = %id, "publication deleted");
        Ok(artefact)
    }

    /// Remove an artefact's payload and derived files (blobs-before-row
    /// half of the cascade, shared with archival).
    pub(crate) fn remove_blobs(&self, artefact: &Artefact) -> PublicationResult<()> {
        self.payload_blob.delete(&artefact.payload)?;
        self.files.delete_for(artefact.artefact_id)?;
        Ok(())
    }
}

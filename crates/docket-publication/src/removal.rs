use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use docket_store::ArtefactStore;
use docket_trigger::{BulkRemovalSummary, ReportingClient};
use docket_types::{ArtefactId, LocationId};

use crate::delete::PublicationDeleteService;
use crate::error::{PublicationError, PublicationResult};

/// Resolves location-name prefixes to location ids for the bulk variants.
/// Location naming itself is an upstream concern.
pub trait LocationDirectory: Send + Sync {
    fn ids_matching_prefix(&self, prefix: &str) -> Vec<LocationId>;
}

/// Archival and bulk-removal cascades.
///
/// Archival mirrors deletion's blob cleanup but moves the row into the
/// archive table instead of dropping it, preserving historical
/// queryability. The bulk variants resolve the affected set first, run the
/// per-artefact cascade, and send one aggregate admin notification — never
/// one per artefact.
pub struct PublicationRemovalService {
    store: Arc<dyn ArtefactStore>,
    delete: Arc<PublicationDeleteService>,
    reporting: Arc<dyn ReportingClient>,
    locations: Arc<dyn LocationDirectory>,
}

impl PublicationRemovalService {
    pub fn new(
        store: Arc<dyn ArtefactStore>,
        delete: Arc<PublicationDeleteService>,
        reporting: Arc<dyn ReportingClient>,
        locations: Arc<dyn LocationDirectory>,
    ) -> Self {
        Self {
            store,
            delete,
            reporting,
            locations,
        }
    }

    /// Archive a single publication: blobs removed, row moved to the
    /// archive table.
    pub fn archive(&self, id: ArtefactId) -> PublicationResult<()> {
        let artefact = self
            .store
            .find_by_id(id)?
            .ok_or(PublicationError::NotFound(id))?;

        // Blobs before the row, same ordering as deletion.
        self.delete.remove_blobs(&artefact)?;
        self.store.archive(id)?;
        info!(artefact = %id, "publication archived");
        Ok(())
    }

    /// Daily sweep: archive every publication whose display window closed
    /// before `today`. Returns how many were archived.
    pub fn archive_expired(&self, today: NaiveDate) -> PublicationResult<usize> {
        let outdated = self.store.find_outdated(today)?;
        let count = outdated.len();
        for artefact in outdated {
            self.archive(artefact.artefact_id)?;
        }
        info!(count, %today, "expired publications archived");
        Ok(count)
    }

    /// Delete every publication at the given location, then notify admins
    /// once with the aggregate.
    pub fn delete_all_for_location(
        &self,
        location: LocationId,
    ) -> PublicationResult<BulkRemovalSummary> {
        self.delete_bulk(vec![location])
    }

    /// Delete every publication at locations whose name matches `prefix`.
    pub fn delete_all_matching_prefix(
        &self,
        prefix: &str,
    ) -> PublicationResult<BulkRemovalSummary> {
        self.delete_bulk(self.locations.ids_matching_prefix(prefix))
    }

    /// Archive every publication at the given location, then notify admins
    /// once with the aggregate.
    pub fn archive_all_for_location(
        &self,
        location: LocationId,
    ) -> PublicationResult<BulkRemovalSummary> {
        self.archive_bulk(vec![location])
    }

    /// Archive every publication at locations whose name matches `prefix`.
    pub fn archive_all_matching_prefix(
        &self,
        prefix: &str,
    ) -> PublicationResult<BulkRemovalSummary> {
        self.archive_bulk(self.locations.ids_matching_prefix(prefix))
    }

    fn delete_bulk(&self, locations: Vec<LocationId>) -> PublicationResult<BulkRemovalSummary> {
        let affected = self.store.find_all_by_location_ids(&locations)?;
        let mut deleted = Vec::with_capacity(affected.len());
        for artefact in affected {
            self.delete.delete(artefact.artefact_id)?;
            deleted.push(artefact.artefact_id);
        }
        self.finish_bulk(BulkRemovalSummary {
            locations,
            deleted,
            archived: Vec::new(),
        })
    }

    fn archive_bulk(&self, locations: Vec<LocationId>) -> PublicationResult<BulkRemovalSummary> {
        let affected = self.store.find_all_by_location_ids(&locations)?;
        let mut archived = Vec::with_capacity(affected.len());
        for artefact in affected {
            self.archive(artefact.artefact_id)?;
            archived.push(artefact.artefact_id);
        }
        self.finish_bulk(BulkRemovalSummary {
            locations,
            deleted: Vec::new(),
            archived,
        })
    }

    fn finish_bulk(&self, summary: BulkRemovalSummary) -> PublicationResult<BulkRemovalSummary> {
        self.reporting.notify_admins(&summary)?;
        info!(
            locations = summary.locations.len(),
            removed = summary.total(),
            "bulk removal complete"
        );
        Ok(summary)
    }
}

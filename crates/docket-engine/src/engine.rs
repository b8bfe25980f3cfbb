use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use docket_blob::BlobStore;
use docket_files::{
    AuthorizationCheck, DerivedFileKind, FileManagementService, FilesConfig, GeneratorTable,
};
use docket_publication::{
    CreatedPublication, CreationConfig, DedupResolver, LocationDirectory, PublicationCreationService,
    PublicationDeleteService, PublicationError, PublicationRemovalService,
};
use docket_store::ArtefactStore;
use docket_trigger::{
    ArtefactTriggerService, BulkRemovalSummary, ReportingClient, SubscriptionNotifier,
};
use docket_types::{Artefact, ArtefactId, Caller, LocationId};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// The work that runs after a creation commits: derived-file generation
/// from the committed payload, then trigger evaluation. Cheap to clone into
/// a spawned task, and re-runnable for any artefact at any time.
#[derive(Clone)]
struct PostCommitTail {
    payload_blob: Arc<dyn BlobStore>,
    files: Arc<FileManagementService>,
    trigger: Arc<ArtefactTriggerService>,
}

impl PostCommitTail {
    fn run(&self, artefact: &Artefact, today: NaiveDate) -> EngineResult<bool> {
        let payload = self.payload_blob.get(&artefact.payload)?;
        self.files.generate(artefact, &payload)?;
        Ok(self.trigger.evaluate_new(artefact, today)?)
    }
}

/// Composition root and façade over the publication services.
///
/// Constructed once at startup from injected store, blob, and collaborator
/// implementations; every service is built here and nowhere else.
pub struct PublicationEngine {
    store: Arc<dyn ArtefactStore>,
    payload_blob: Arc<dyn BlobStore>,
    files: Arc<FileManagementService>,
    creation: Arc<PublicationCreationService>,
    delete: Arc<PublicationDeleteService>,
    removal: PublicationRemovalService,
    trigger: Arc<ArtefactTriggerService>,
}

impl PublicationEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn ArtefactStore>,
        payload_blob: Arc<dyn BlobStore>,
        derived_blob: Arc<dyn BlobStore>,
        generators: GeneratorTable,
        authorizer: Arc<dyn AuthorizationCheck>,
        notifier: Arc<dyn SubscriptionNotifier>,
        reporting: Arc<dyn ReportingClient>,
        locations: Arc<dyn LocationDirectory>,
        config: EngineConfig,
    ) -> Self {
        let files = Arc::new(FileManagementService::new(
            derived_blob,
            generators,
            authorizer,
            FilesConfig {
                max_generation_bytes: config.max_generation_bytes,
            },
        ));
        let trigger = Arc::new(ArtefactTriggerService::new(
            Arc::clone(&store),
            Arc::clone(&notifier),
            Arc::clone(&reporting),
        ));
        let creation = Arc::new(PublicationCreationService::new(
            Arc::clone(&store),
            Arc::clone(&payload_blob),
            DedupResolver::new(Arc::clone(&store), Arc::clone(&files)),
            CreationConfig {
                max_attempts: config.max_create_attempts,
            },
        ));
        let delete = Arc::new(PublicationDeleteService::new(
            Arc::clone(&store),
            Arc::clone(&payload_blob),
            Arc::clone(&files),
            notifier,
        ));
        let removal = PublicationRemovalService::new(
            Arc::clone(&store),
            Arc::clone(&delete),
            reporting,
            locations,
        );
        Self {
            store,
            payload_blob,
            files,
            creation,
            delete,
            removal,
            trigger,
        }
    }

    // ---- Ingestion ----

    /// Create or supersede a publication, then dispatch the post-commit
    /// tail fire-and-forget.
    ///
    /// The returned publication has committed; tail failures are logged and
    /// never observed by the caller.
    pub async fn publish(
        &self,
        candidate: Artefact,
        payload: Vec<u8>,
    ) -> EngineResult<CreatedPublication> {
        let creation = Arc::clone(&self.creation);
        let created = tokio::task::spawn_blocking(move || {
            creation.create(candidate, &payload, Utc::now())
        })
        .await
        .map_err(|e| EngineError::Runtime(e.to_string()))?
        .map_err(Self::publication_error)?;

        self.dispatch_post_commit(created.artefact.clone());
        Ok(created)
    }

    /// Re-run the post-commit tail for a committed artefact. Safe to call
    /// any number of times; generation replaces previous renders and
    /// trigger delivery is at-least-once by contract.
    pub fn run_post_commit(&self, artefact: &Artefact, today: NaiveDate) -> EngineResult<bool> {
        self.tail().run(artefact, today)
    }

    fn dispatch_post_commit(&self, artefact: Artefact) {
        let tail = self.tail();
        tokio::spawn(async move {
            let id = artefact.artefact_id;
            let outcome = tokio::task::spawn_blocking(move || {
                tail.run(&artefact, Utc::now().date_naive())
            })
            .await;
            match outcome {
                Ok(Ok(notified)) => {
                    info!(artefact = %id, notified, "post-commit tail complete");
                }
                Ok(Err(e)) => warn!(artefact = %id, error = %e, "post-commit tail failed"),
                Err(e) => warn!(artefact = %id, error = %e, "post-commit tail panicked"),
            }
        });
    }

    fn tail(&self) -> PostCommitTail {
        PostCommitTail {
            payload_blob: Arc::clone(&self.payload_blob),
            files: Arc::clone(&self.files),
            trigger: Arc::clone(&self.trigger),
        }
    }

    // ---- Retrieval ----

    /// A live artefact's metadata row.
    pub fn get_artefact(&self, id: ArtefactId) -> EngineResult<Artefact> {
        self.store
            .find_by_id(id)?
            .ok_or(EngineError::NotFound(id))
    }

    /// A live artefact's payload, byte for byte as ingested.
    pub fn get_payload(&self, id: ArtefactId) -> EngineResult<Vec<u8>> {
        let artefact = self.get_artefact(id)?;
        Ok(self.payload_blob.get(&artefact.payload)?)
    }

    /// One of a live artefact's derived files, gated by sensitivity and the
    /// caller-supplied size ceiling.
    pub fn fetch_file(
        &self,
        id: ArtefactId,
        kind: DerivedFileKind,
        caller: &Caller,
        max_bytes: Option<u64>,
    ) -> EngineResult<Vec<u8>> {
        let artefact = self.get_artefact(id)?;
        Ok(self.files.fetch(&artefact, kind, caller, max_bytes)?)
    }

    /// Live artefacts at a location currently inside their display window.
    pub fn active_for_location(
        &self,
        today: NaiveDate,
        location: LocationId,
    ) -> EngineResult<Vec<Artefact>> {
        Ok(self.store.find_active_for_location(today, location)?)
    }

    // ---- Removal ----

    /// Delete a publication and everything it owns.
    pub fn delete_publication(&self, id: ArtefactId) -> EngineResult<Artefact> {
        self.delete.delete(id).map_err(Self::publication_error)
    }

    /// Archive a publication: blobs removed, row kept for history.
    pub fn archive_publication(&self, id: ArtefactId) -> EngineResult<()> {
        self.removal.archive(id).map_err(Self::publication_error)
    }

    pub fn delete_all_for_location(
        &self,
        location: LocationId,
    ) -> EngineResult<BulkRemovalSummary> {
        self.removal
            .delete_all_for_location(location)
            .map_err(Self::publication_error)
    }

    pub fn archive_all_for_location(
        &self,
        location: LocationId,
    ) -> EngineResult<BulkRemovalSummary> {
        self.removal
            .archive_all_for_location(location)
            .map_err(Self::publication_error)
    }

    pub fn delete_all_matching_prefix(
        &self,
        prefix: &str,
    ) -> EngineResult<BulkRemovalSummary> {
        self.removal
            .delete_all_matching_prefix(prefix)
            .map_err(Self::publication_error)
    }

    pub fn archive_all_matching_prefix(
        &self,
        prefix: &str,
    ) -> EngineResult<BulkRemovalSummary> {
        self.removal
            .archive_all_matching_prefix(prefix)
            .map_err(Self::publication_error)
    }

    // ---- Wall-clock sweeps ----

    /// Daily: archive publications whose display window has closed.
    pub fn archive_expired(&self, today: NaiveDate) -> EngineResult<usize> {
        self.removal
            .archive_expired(today)
            .map_err(Self::publication_error)
    }

    /// Daily: notify for publications whose display window opens today.
    pub fn sweep_newly_active(&self, today: NaiveDate) -> EngineResult<usize> {
        Ok(self.trigger.sweep_newly_active(today)?)
    }

    /// Periodic: report all unresolved-location publications to operators.
    pub fn sweep_no_match(&self) -> EngineResult<usize> {
        Ok(self.trigger.sweep_no_match()?)
    }

    /// Keep the engine-level `NotFound` uniform across services.
    fn publication_error(e: PublicationError) -> EngineError {
        match e {
            PublicationError::NotFound(id) => EngineError::NotFound(id),
            other => EngineError::Publication(other),
        }
    }
}

use std::sync::Arc;

use tracing::debug;

use docket_files::FileManagementService;
use docket_store::ArtefactStore;
use docket_types::{Artefact, BlobKey};

use crate::error::PublicationResult;

/// Whether a candidate matched an existing live artefact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DedupOutcome {
    /// No live artefact owns the candidate's identity tuple.
    Fresh,
    /// The candidate supersedes an existing artefact. The previous payload
    /// key is the caller's to delete — only after the new row has committed,
    /// so readers never observe a row without a resolvable payload.
    Supersedes { previous_payload: BlobKey },
}

/// Matches a candidate against the live table by exact identity tuple.
pub struct DedupResolver {
    store: Arc<dyn ArtefactStore>,
    files: Arc<FileManagementService>,
}

impl DedupResolver {
    pub fn new(store: Arc<dyn ArtefactStore>, files: Arc<FileManagementService>) -> Self {
        Self { store, files }
    }

    /// Resolve the candidate against the live table.
    ///
    /// On a match the candidate takes over the existing artefact's identity
    /// (same id, bumped counter) and the old derived files are deleted
    /// eagerly, so a stale render is never served mid-update. Any mismatch
    /// on any tuple field is a distinct artefact, never a supersession.
    pub fn resolve(&self, candidate: &mut Artefact) -> PublicationResult<DedupOutcome> {
        let Some(existing) = self.store.find_by_identity(&candidate.identity())? else {
            return Ok(DedupOutcome::Fresh);
        };

        debug!(
            existing = %existing.artefact_id,
            count = existing.superseded_count,
            "candidate supersedes an existing artefact"
        );
        candidate.supersede(&existing);
        self.files.delete_for(existing.artefact_id)?;

        Ok(DedupOutcome::Supersedes {
            previous_payload: existing.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use docket_blob::{BlobStore, InMemoryBlobStore};
    use docket_files::{
        derived_key, AuthorizationCheck, DerivedFileKind, FileGenerator, FileResult,
        FilesConfig, GeneratorTable, RenderedFiles,
    };
    use docket_store::InMemoryArtefactStore;
    use docket_types::{
        Language, ListType, LocationId, Provenance, Sensitivity, UserId,
    };

    struct PdfStub;

    impl FileGenerator for PdfStub {
        fn generate(&self, _: &Artefact, _: &[u8]) -> FileResult<Option<RenderedFiles>> {
            Ok(Some(RenderedFiles {
                primary: b"%PDF".to_vec(),
                secondary_language: None,
                spreadsheet: None,
            }))
        }
    }

    struct DenyAll;

    impl AuthorizationCheck for DenyAll {
        fn is_authorised(&self, _: &UserId, _: ListType, _: Sensitivity) -> bool {
            false
        }
    }

    fn candidate() -> Artefact {
        Artefact::candidate(
            LocationId::new(10),
            Provenance::CourtService,
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
            NaiveDate::from_ymd_opt(2024, 12, 16).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap(),
            None,
        )
    }

    fn harness() -> (
        Arc<InMemoryArtefactStore>,
        Arc<InMemoryBlobStore>,
        DedupResolver,
    ) {
        let store = Arc::new(InMemoryArtefactStore::new());
        let derived = Arc::new(InMemoryBlobStore::new());
        let files = Arc::new(FileManagementService::new(
            Arc::clone(&derived) as Arc<dyn BlobStore>,
            GeneratorTable::new(Arc::new(PdfStub)),
            Arc::new(DenyAll),
            FilesConfig::default(),
        ));
        let resolver = DedupResolver::new(Arc::clone(&store) as Arc<dyn ArtefactStore>, files);
        (store, derived, resolver)
    }

    #[test]
    fn unmatched_candidate_is_fresh() {
        let (_, _, resolver) = harness();
        let mut candidate = candidate();
        let original_id = candidate.artefact_id;

        assert_eq!(resolver.resolve(&mut candidate).unwrap(), DedupOutcome::Fresh);
        assert_eq!(candidate.artefact_id, original_id);
        assert_eq!(candidate.superseded_count, 0);
    }

    #[test]
    fn match_adopts_identity_and_reports_old_payload() {
        let (store, _, resolver) = harness();
        let existing = candidate();
        store.save(&existing).unwrap();

        let mut incoming = candidate();
        let outcome = resolver.resolve(&mut incoming).unwrap();

        assert_eq!(
            outcome,
            DedupOutcome::Supersedes {
                previous_payload: existing.payload.clone()
            }
        );
        assert_eq!(incoming.artefact_id, existing.artefact_id);
        assert_eq!(incoming.superseded_count, 1);
    }

    #[test]
    fn match_eagerly_deletes_old_derived_files() {
        let (store, derived, resolver) = harness();
        let existing = candidate();
        store.save(&existing).unwrap();
        let stale = derived_key(existing.artefact_id, DerivedFileKind::Primary);
        derived.put(&stale, b"%PDF stale".to_vec()).unwrap();

        resolver.resolve(&mut candidate()).unwrap();

        assert!(!derived.exists(&stale).unwrap());
    }

    #[test]
    fn tuple_mismatch_is_never_a_supersession() {
        let (store, _, resolver) = harness();
        store.save(&candidate()).unwrap();

        let mut other_day = candidate();
        other_day.content_date = NaiveDate::from_ymd_opt(2024, 12, 17).unwrap();
        assert_eq!(resolver.resolve(&mut other_day).unwrap(), DedupOutcome::Fresh);

        let mut other_language = candidate();
        other_language.language = Language::Welsh;
        assert_eq!(
            resolver.resolve(&mut other_language).unwrap(),
            DedupOutcome::Fresh
        );
    }
}

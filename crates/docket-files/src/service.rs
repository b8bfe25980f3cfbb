use std::sync::Arc;

use tracing::{debug, info, warn};

use docket_blob::{BlobError, BlobStore};
use docket_types::{Artefact, ArtefactId, Caller, ListType, Sensitivity, UserId};

use crate::error::{FileError, FileResult};
use crate::generator::GeneratorTable;
use crate::keys::{derived_key, DerivedFileKind};

/// External authorization check for non-public sensitivities.
pub trait AuthorizationCheck: Send + Sync {
    fn is_authorised(&self, user: &UserId, list_type: ListType, sensitivity: Sensitivity) -> bool;
}

/// Configuration for derived-file generation.
#[derive(Clone, Debug)]
pub struct FilesConfig {
    /// Payloads at or above this size skip generation entirely.
    pub max_generation_bytes: u64,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            max_generation_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Generate / fetch / delete lifecycle for an artefact's derived files.
///
/// Generation is regeneration: every pass first deletes all three possible
/// keys, so a supersession can never leave a stale render behind even for
/// kinds the new payload no longer produces.
pub struct FileManagementService {
    derived: Arc<dyn BlobStore>,
    generators: GeneratorTable,
    authorizer: Arc<dyn AuthorizationCheck>,
    config: FilesConfig,
}

impl FileManagementService {
    pub fn new(
        derived: Arc<dyn BlobStore>,
        generators: GeneratorTable,
        authorizer: Arc<dyn AuthorizationCheck>,
        config: FilesConfig,
    ) -> Self {
        Self {
            derived,
            generators,
            authorizer,
            config,
        }
    }

    /// Render and store the derived files for a committed payload.
    ///
    /// Skips (without error) flat files, NoMatch locations, and payloads at
    /// or above the generation size limit. Returns whether files were
    /// stored.
    pub fn generate(&self, artefact: &Artefact, payload: &[u8]) -> FileResult<bool> {
        if artefact.is_flat_file {
            debug!(artefact = %artefact.artefact_id, "flat file, skipping generation");
            return Ok(false);
        }
        if artefact.location_id.is_no_match() {
            debug!(artefact = %artefact.artefact_id, "unresolved location, skipping generation");
            return Ok(false);
        }
        if payload.len() as u64 >= self.config.max_generation_bytes {
            info!(
                artefact = %artefact.artefact_id,
                size = payload.len(),
                limit = self.config.max_generation_bytes,
                "payload too large, skipping generation"
            );
            return Ok(false);
        }

        // Clear stale renders before writing; the keys are write-once.
        self.delete_for(artefact.artefact_id)?;

        let generator = self.generators.resolve(artefact.list_type);
        let Some(files) = generator.generate(artefact, payload)? else {
            debug!(artefact = %artefact.artefact_id, "generator produced nothing");
            return Ok(false);
        };

        self.derived.put(
            &derived_key(artefact.artefact_id, DerivedFileKind::Primary),
            files.primary,
        )?;
        if let Some(bytes) = files.secondary_language {
            self.derived.put(
                &derived_key(artefact.artefact_id, DerivedFileKind::SecondaryLanguage),
                bytes,
            )?;
        }
        if let Some(bytes) = files.spreadsheet {
            self.derived.put(
                &derived_key(artefact.artefact_id, DerivedFileKind::Spreadsheet),
                bytes,
            )?;
        }

        info!(artefact = %artefact.artefact_id, "derived files stored");
        Ok(true)
    }

    /// Fetch one of an artefact's derived files.
    ///
    /// Authorization runs first. The caller-supplied ceiling is applied
    /// *after* the bytes are fetched, so an oversized file reports its real
    /// size instead of masquerading as missing.
    pub fn fetch(
        &self,
        artefact: &Artefact,
        kind: DerivedFileKind,
        caller: &Caller,
        max_bytes: Option<u64>,
    ) -> FileResult<Vec<u8>> {
        self.authorize(artefact, caller)?;

        let key = derived_key(artefact.artefact_id, kind);
        let bytes = match self.derived.get(&key) {
            Ok(bytes) => bytes,
            Err(BlobError::NotFound(_)) => {
                return Err(FileError::NotFound {
                    artefact_id: artefact.artefact_id,
                    kind,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(limit) = max_bytes {
            let actual = bytes.len() as u64;
            if actual > limit {
                return Err(FileError::SizeLimitExceeded { actual, limit });
            }
        }
        Ok(bytes)
    }

    /// Remove all derived files for an artefact.
    ///
    /// Deleting a key that was never rendered is a no-op, so this is safe
    /// for every list type and every lifecycle stage.
    pub fn delete_for(&self, artefact_id: ArtefactId) -> FileResult<()> {
        for kind in DerivedFileKind::ALL {
            if let Err(e) = self.derived.delete(&derived_key(artefact_id, kind)) {
                warn!(artefact = %artefact_id, %kind, error = %e, "derived-file delete failed");
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn authorize(&self, artefact: &Artefact, caller: &Caller) -> FileResult<()> {
        if artefact.sensitivity.is_public() {
            return Ok(());
        }
        match caller {
            Caller::System => Ok(()),
            Caller::User(user) => {
                if self
                    .authorizer
                    .is_authorised(user, artefact.list_type, artefact.sensitivity)
                {
                    Ok(())
                } else {
                    Err(FileError::Unauthorised)
                }
            }
            Caller::Anonymous => Err(FileError::Unauthorised),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FileGenerator, RenderedFiles};
    use chrono::{NaiveDate, TimeZone, Utc};
    use docket_blob::InMemoryBlobStore;
    use docket_types::{Language, LocationId, Provenance};

    /// Renders fixed bytes, with a secondary PDF for bilingual artefacts
    /// and a spreadsheet for list types that carry one.
    struct StubGenerator;

    impl FileGenerator for StubGenerator {
        fn generate(
            &self,
            artefact: &Artefact,
            payload: &[u8],
        ) -> FileResult<Option<RenderedFiles>> {
            let mut primary = b"%PDF ".to_vec();
            primary.extend_from_slice(payload);
            Ok(Some(RenderedFiles {
                primary,
                secondary_language: artefact
                    .language
                    .secondary()
                    .map(|_| b"%PDF cy".to_vec()),
                spreadsheet: artefact
                    .list_type
                    .has_spreadsheet()
                    .then(|| b"xlsx".to_vec()),
            }))
        }
    }

    struct NeverRenders;

    impl FileGenerator for NeverRenders {
        fn generate(&self, _: &Artefact, _: &[u8]) -> FileResult<Option<RenderedFiles>> {
            Ok(None)
        }
    }

    struct AllowList(Vec<String>);

    impl AuthorizationCheck for AllowList {
        fn is_authorised(&self, user: &UserId, _: ListType, _: Sensitivity) -> bool {
            self.0.iter().any(|u| u == user.as_str())
        }
    }

    fn artefact(list_type: ListType, language: Language, sensitivity: Sensitivity) -> Artefact {
        Artefact::candidate(
            LocationId::new(10),
            Provenance::CourtService,
            list_type,
            language,
            sensitivity,
            NaiveDate::from_ymd_opt(2024, 12, 16).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap(),
            None,
        )
    }

    fn service(blob: Arc<InMemoryBlobStore>) -> FileManagementService {
        FileManagementService::new(
            blob,
            GeneratorTable::new(Arc::new(StubGenerator)),
            Arc::new(AllowList(vec!["verified-user".into()])),
            FilesConfig::default(),
        )
    }

    // -----------------------------------------------------------------------
    // Generation gating
    // -----------------------------------------------------------------------

    #[test]
    fn generates_primary_pdf() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );

        assert!(svc.generate(&artefact, b"{\"hearings\":[]}").unwrap());
        assert!(blob
            .exists(&derived_key(artefact.artefact_id, DerivedFileKind::Primary))
            .unwrap());
        // English-only civil list: no secondary, no spreadsheet.
        assert!(!blob
            .exists(&derived_key(
                artefact.artefact_id,
                DerivedFileKind::SecondaryLanguage
            ))
            .unwrap());
        assert!(!blob
            .exists(&derived_key(
                artefact.artefact_id,
                DerivedFileKind::Spreadsheet
            ))
            .unwrap());
    }

    #[test]
    fn bilingual_sjp_renders_all_three() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let artefact = artefact(
            ListType::SjpPublicList,
            Language::Bilingual,
            Sensitivity::Public,
        );

        assert!(svc.generate(&artefact, b"{}").unwrap());
        for kind in DerivedFileKind::ALL {
            assert!(
                blob.exists(&derived_key(artefact.artefact_id, kind)).unwrap(),
                "{kind} missing"
            );
        }
    }

    #[test]
    fn flat_files_skip_generation() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        )
        .flat_file();

        assert!(!svc.generate(&artefact, b"raw bytes").unwrap());
        assert!(blob.is_empty());
    }

    #[test]
    fn no_match_locations_skip_generation() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let mut artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );
        artefact.location_id = LocationId::NO_MATCH;

        assert!(!svc.generate(&artefact, b"{}").unwrap());
        assert!(blob.is_empty());
    }

    #[test]
    fn oversized_payloads_skip_generation() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = FileManagementService::new(
            Arc::clone(&blob) as Arc<dyn BlobStore>,
            GeneratorTable::new(Arc::new(StubGenerator)),
            Arc::new(AllowList(vec![])),
            FilesConfig {
                max_generation_bytes: 16,
            },
        );
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );

        assert!(!svc.generate(&artefact, &[0u8; 16]).unwrap());
        assert!(blob.is_empty());
    }

    #[test]
    fn generator_declining_is_not_an_error() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = FileManagementService::new(
            Arc::clone(&blob) as Arc<dyn BlobStore>,
            GeneratorTable::new(Arc::new(NeverRenders)),
            Arc::new(AllowList(vec![])),
            FilesConfig::default(),
        );
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );

        assert!(!svc.generate(&artefact, b"{}").unwrap());
        assert!(blob.is_empty());
    }

    // -----------------------------------------------------------------------
    // Regeneration replaces stale renders
    // -----------------------------------------------------------------------

    #[test]
    fn regeneration_replaces_previous_renders() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );

        svc.generate(&artefact, b"v1").unwrap();
        svc.generate(&artefact, b"v2").unwrap();

        let bytes = svc
            .fetch(&artefact, DerivedFileKind::Primary, &Caller::Anonymous, None)
            .unwrap();
        assert_eq!(bytes, b"%PDF v2");
    }

    #[test]
    fn regeneration_clears_kinds_no_longer_produced() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::Bilingual,
            Sensitivity::Public,
        );

        // First pass renders a secondary PDF.
        let svc = service(Arc::clone(&blob));
        svc.generate(&artefact, b"{}").unwrap();
        let secondary = derived_key(artefact.artefact_id, DerivedFileKind::SecondaryLanguage);
        assert!(blob.exists(&secondary).unwrap());

        // Second pass with a generator that only renders the primary.
        struct PrimaryOnly;
        impl FileGenerator for PrimaryOnly {
            fn generate(&self, _: &Artefact, _: &[u8]) -> FileResult<Option<RenderedFiles>> {
                Ok(Some(RenderedFiles {
                    primary: b"%PDF only".to_vec(),
                    secondary_language: None,
                    spreadsheet: None,
                }))
            }
        }
        let svc = FileManagementService::new(
            Arc::clone(&blob) as Arc<dyn BlobStore>,
            GeneratorTable::new(Arc::new(PrimaryOnly)),
            Arc::new(AllowList(vec![])),
            FilesConfig::default(),
        );
        svc.generate(&artefact, b"{}").unwrap();
        assert!(!blob.exists(&secondary).unwrap());
    }

    // -----------------------------------------------------------------------
    // Idempotent deletion
    // -----------------------------------------------------------------------

    #[test]
    fn delete_when_no_files_exist_is_a_noop() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        svc.delete_for(ArtefactId::new()).unwrap();
        svc.delete_for(ArtefactId::new()).unwrap();
    }

    #[test]
    fn delete_removes_every_kind() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(Arc::clone(&blob));
        let artefact = artefact(
            ListType::SjpPublicList,
            Language::Bilingual,
            Sensitivity::Public,
        );
        svc.generate(&artefact, b"{}").unwrap();

        svc.delete_for(artefact.artefact_id).unwrap();
        assert!(blob.is_empty());
    }

    // -----------------------------------------------------------------------
    // Retrieval authorization
    // -----------------------------------------------------------------------

    #[test]
    fn public_is_readable_by_anyone() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );
        svc.generate(&artefact, b"{}").unwrap();

        for caller in [
            Caller::Anonymous,
            Caller::System,
            Caller::User(UserId::new("anyone-at-all")),
        ] {
            assert!(svc
                .fetch(&artefact, DerivedFileKind::Primary, &caller, None)
                .is_ok());
        }
    }

    #[test]
    fn classified_requires_an_authorised_user() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Classified,
        );
        svc.generate(&artefact, b"{}").unwrap();

        assert_eq!(
            svc.fetch(&artefact, DerivedFileKind::Primary, &Caller::Anonymous, None),
            Err(FileError::Unauthorised)
        );
        assert_eq!(
            svc.fetch(
                &artefact,
                DerivedFileKind::Primary,
                &Caller::User(UserId::new("stranger")),
                None
            ),
            Err(FileError::Unauthorised)
        );
        assert!(svc
            .fetch(
                &artefact,
                DerivedFileKind::Primary,
                &Caller::User(UserId::new("verified-user")),
                None
            )
            .is_ok());
    }

    #[test]
    fn system_caller_bypasses_authorization() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Private,
        );
        svc.generate(&artefact, b"{}").unwrap();

        assert!(svc
            .fetch(&artefact, DerivedFileKind::Primary, &Caller::System, None)
            .is_ok());
    }

    // -----------------------------------------------------------------------
    // Size ceiling
    // -----------------------------------------------------------------------

    #[test]
    fn size_ceiling_is_checked_after_fetch() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );
        svc.generate(&artefact, b"{}").unwrap();

        // A 1-byte ceiling reports the real size, not a missing file.
        let err = svc
            .fetch(&artefact, DerivedFileKind::Primary, &Caller::Anonymous, Some(1))
            .unwrap_err();
        assert!(matches!(
            err,
            FileError::SizeLimitExceeded { actual, limit: 1 } if actual > 1
        ));

        // A generous ceiling passes.
        assert!(svc
            .fetch(
                &artefact,
                DerivedFileKind::Primary,
                &Caller::Anonymous,
                Some(1024)
            )
            .is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let blob = Arc::new(InMemoryBlobStore::new());
        let svc = service(blob);
        let artefact = artefact(
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
        );

        let err = svc
            .fetch(&artefact, DerivedFileKind::Spreadsheet, &Caller::Anonymous, None)
            .unwrap_err();
        assert_eq!(
            err,
            FileError::NotFound {
                artefact_id: artefact.artefact_id,
                kind: DerivedFileKind::Spreadsheet,
            }
        );
    }
}

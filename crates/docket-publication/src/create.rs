use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use docket_blob::BlobStore;
use docket_store::{ArtefactStore, StoreError};
use docket_types::{Artefact, BlobKey};

use crate::dedup::{DedupOutcome, DedupResolver};
use crate::error::{PublicationError, PublicationResult};

/// How a creation resolved: a brand-new artefact, or an in-place
/// replacement of an existing one.
///
/// An explicit sum type, so callers and the retry loop branch on values
/// instead of inspecting error taxonomies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationOutcome {
    Created,
    Superseded,
}

/// The committed artefact plus how it got there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedPublication {
    pub artefact: Artefact,
    pub outcome: CreationOutcome,
}

/// Configuration for the creation retry loop.
#[derive(Clone, Debug)]
pub struct CreationConfig {
    /// Total attempts before surfacing `Conflict` (first try included).
    pub max_attempts: u32,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

/// Cleans up the payload blob a failed creation attempt wrote.
///
/// Every attempt writes its payload before the row commits, so an attempt
/// that loses the identity race has a reachable-but-unowned blob to dispose
/// of. Cleanup failures are logged and swallowed: compensation must never
/// mask the error that triggered it.
pub struct RetryCompensation {
    payload_blob: Arc<dyn BlobStore>,
}

impl RetryCompensation {
    pub fn new(payload_blob: Arc<dyn BlobStore>) -> Self {
        Self { payload_blob }
    }

    /// Delete the blob written by a failed attempt.
    pub fn discard(&self, key: &BlobKey) {
        match self.payload_blob.delete(key) {
            Ok(true) => debug!(%key, "orphaned attempt blob removed"),
            Ok(false) => {}
            Err(e) => warn!(%key, error = %e, "orphaned attempt blob could not be removed"),
        }
    }
}

/// Orchestrates create-or-supersede with transactional consistency.
///
/// Ordered steps, each a correctness boundary:
/// 1. dedup against the live table, remembering the old payload on a match;
/// 2. write the payload under a freshly minted key (keys are never reused);
/// 3. save the row — an identity conflict means another writer won the
///    race, so the whole operation retries from dedup, up to
///    `max_attempts` times;
/// 4. only after the save, delete the superseded payload blob;
/// 5. exhausted retries surface `Conflict`, and every failed attempt's blob
///    has been compensated.
pub struct PublicationCreationService {
    store: Arc<dyn ArtefactStore>,
    payload_blob: Arc<dyn BlobStore>,
    dedup: DedupResolver,
    compensation: RetryCompensation,
    config: CreationConfig,
}

impl PublicationCreationService {
    pub fn new(
        store: Arc<dyn ArtefactStore>,
        payload_blob: Arc<dyn BlobStore>,
        dedup: DedupResolver,
        config: CreationConfig,
    ) -> Self {
        let compensation = RetryCompensation::new(Arc::clone(&payload_blob));
        Self {
            store,
            payload_blob,
            dedup,
            compensation,
            config,
        }
    }

    /// Create a publication, or supersede the live artefact that owns the
    /// candidate's identity tuple.
    pub fn create(
        &self,
        mut candidate: Artefact,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> PublicationResult<CreatedPublication> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let outcome = self.dedup.resolve(&mut candidate)?;

            let key = BlobKey::fresh();
            self.payload_blob.put(&key, payload.to_vec())?;
            candidate.payload = key.clone();
            candidate.payload_size = payload.len() as u64;
            candidate.last_received = now;

            match self.store.save(&candidate) {
                Ok(()) => {
                    return self.finish(candidate, outcome);
                }
                Err(StoreError::IdentityConflict { existing, .. }) => {
                    // Lost the race for a brand-new tuple. The winner's row
                    // is now live; re-running dedup will supersede it.
                    self.compensation.discard(&key);
                    if attempts >= self.config.max_attempts {
                        warn!(
                            winner = %existing,
                            attempts,
                            "identity tuple still contended, giving up"
                        );
                        return Err(PublicationError::Conflict { attempts });
                    }
                    debug!(winner = %existing, attempt = attempts, "identity race lost, retrying");
                }
                Err(e) => {
                    self.compensation.discard(&key);
                    return Err(e.into());
                }
            }
        }
    }

    fn finish(
        &self,
        artefact: Artefact,
        outcome: DedupOutcome,
    ) -> PublicationResult<CreatedPublication> {
        let outcome = match outcome {
            DedupOutcome::Fresh => {
                info!(artefact = %artefact.artefact_id, "publication created");
                CreationOutcome::Created
            }
            DedupOutcome::Supersedes { previous_payload } => {
                // The row has committed; the old payload is unreachable from
                // any row and can go.
                self.payload_blob.delete(&previous_payload)?;
                info!(
                    artefact = %artefact.artefact_id,
                    count = artefact.superseded_count,
                    "publication superseded"
                );
                CreationOutcome::Superseded
            }
        };
        Ok(CreatedPublication { artefact, outcome })
    }
}

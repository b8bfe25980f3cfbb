use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use docket_types::{Artefact, ArtefactId, ArtefactIdentity, LocationId};

use crate::error::{StoreError, StoreResult};
use crate::traits::ArtefactStore;

#[derive(Default)]
struct Tables {
    live: HashMap<ArtefactId, Artefact>,
    /// Secondary index enforcing the one-live-artefact-per-tuple invariant.
    identity_index: HashMap<ArtefactIdentity, ArtefactId>,
    archive: HashMap<ArtefactId, Artefact>,
}

/// In-memory artefact store for tests and embedding.
///
/// Live and archive tables are held in `HashMap`s behind a single `RwLock`,
/// so a `save` checks and updates the identity index atomically — the same
/// guarantee a relational unique constraint gives the production backend.
pub struct InMemoryArtefactStore {
    tables: RwLock<Tables>,
}

impl InMemoryArtefactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Number of live rows.
    pub fn live_count(&self) -> usize {
        self.tables.read().expect("lock poisoned").live.len()
    }

    /// Number of archived rows.
    pub fn archived_count(&self) -> usize {
        self.tables.read().expect("lock poisoned").archive.len()
    }

    /// Returns `true` if both tables are empty.
    pub fn is_empty(&self) -> bool {
        let tables = self.tables.read().expect("lock poisoned");
        tables.live.is_empty() && tables.archive.is_empty()
    }

    /// Remove all rows from both tables.
    pub fn clear(&self) {
        let mut tables = self.tables.write().expect("lock poisoned");
        tables.live.clear();
        tables.identity_index.clear();
        tables.archive.clear();
    }

    fn collect_sorted(rows: impl Iterator<Item = Artefact>) -> Vec<Artefact> {
        let mut out: Vec<Artefact> = rows.collect();
        out.sort_by_key(|a| a.artefact_id);
        out
    }
}

impl Default for InMemoryArtefactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtefactStore for InMemoryArtefactStore {
    fn find_by_id(&self, id: ArtefactId) -> StoreResult<Option<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(tables.live.get(&id).cloned())
    }

    fn find_by_identity(&self, identity: &ArtefactIdentity) -> StoreResult<Option<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(tables
            .identity_index
            .get(identity)
            .and_then(|id| tables.live.get(id))
            .cloned())
    }

    fn save(&self, artefact: &Artefact) -> StoreResult<()> {
        let mut tables = self.tables.write().expect("lock poisoned");
        let identity = artefact.identity();

        if let Some(&owner) = tables.identity_index.get(&identity) {
            if owner != artefact.artefact_id {
                return Err(StoreError::IdentityConflict {
                    identity: Box::new(identity),
                    existing: owner,
                });
            }
        }

        // Replacing an existing row: drop its old index entry in case the
        // tuple changed between writes.
        if let Some(previous) = tables.live.insert(artefact.artefact_id, artefact.clone()) {
            let old_identity = previous.identity();
            if old_identity != identity {
                tables.identity_index.remove(&old_identity);
            }
        }
        tables.identity_index.insert(identity, artefact.artefact_id);
        Ok(())
    }

    fn delete(&self, id: ArtefactId) -> StoreResult<bool> {
        let mut tables = self.tables.write().expect("lock poisoned");
        match tables.live.remove(&id) {
            Some(row) => {
                tables.identity_index.remove(&row.identity());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn archive(&self, id: ArtefactId) -> StoreResult<()> {
        let mut tables = self.tables.write().expect("lock poisoned");
        let row = tables.live.remove(&id).ok_or(StoreError::NotFound(id))?;
        tables.identity_index.remove(&row.identity());
        tables.archive.insert(id, row);
        Ok(())
    }

    fn find_outdated(&self, today: NaiveDate) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(
            tables
                .live
                .values()
                .filter(|a| a.is_expired(today))
                .cloned(),
        ))
    }

    fn find_by_display_from(&self, date: NaiveDate) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(
            tables
                .live
                .values()
                .filter(|a| a.display_from.date_naive() == date)
                .cloned(),
        ))
    }

    fn find_all_no_match(&self) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(
            tables
                .live
                .values()
                .filter(|a| a.location_id.is_no_match())
                .cloned(),
        ))
    }

    fn find_active_for_location(
        &self,
        today: NaiveDate,
        location: LocationId,
    ) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(
            tables
                .live
                .values()
                .filter(|a| a.location_id == location && a.is_trigger_eligible(today))
                .cloned(),
        ))
    }

    fn find_all_by_location_ids(&self, locations: &[LocationId]) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(
            tables
                .live
                .values()
                .filter(|a| locations.contains(&a.location_id))
                .cloned(),
        ))
    }

    fn archived(&self, id: ArtefactId) -> StoreResult<Option<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(tables.archive.get(&id).cloned())
    }

    fn all_archived(&self) -> StoreResult<Vec<Artefact>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(Self::collect_sorted(tables.archive.values().cloned()))
    }
}

impl std::fmt::Debug for InMemoryArtefactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read().expect("lock poisoned");
        f.debug_struct("InMemoryArtefactStore")
            .field("live", &tables.live.len())
            .field("archived", &tables.archive.len())
            .finish()
    }
}

use chrono::NaiveDate;
use docket_types::{Artefact, ArtefactId, ArtefactIdentity, LocationId};

use crate::error::StoreResult;

/// Relational persistence for artefact metadata.
///
/// All implementations must satisfy these invariants:
/// - At most one live artefact per identity tuple. `save` of a new artefact
///   id under an already-owned tuple fails with `IdentityConflict` and
///   leaves the store unchanged.
/// - `save` of an already-live artefact id is an in-place replace (the
///   supersession write path).
/// - A row is live or archived, never both. Date-scoped queries see only
///   live rows; `archived`/`all_archived` see only archived rows.
pub trait ArtefactStore: Send + Sync {
    /// Look up a live artefact by id.
    fn find_by_id(&self, id: ArtefactId) -> StoreResult<Option<Artefact>>;

    /// Look up a live artefact by exact identity tuple.
    fn find_by_identity(&self, identity: &ArtefactIdentity) -> StoreResult<Option<Artefact>>;

    /// Insert or replace a live row.
    ///
    /// Fails with `IdentityConflict` when a *different* live artefact
    /// already owns the candidate's identity tuple.
    fn save(&self, artefact: &Artefact) -> StoreResult<()>;

    /// Remove a live row entirely. Returns `true` if it existed.
    fn delete(&self, id: ArtefactId) -> StoreResult<bool>;

    /// Move a live row into the archive table. Fails with `NotFound` when
    /// no live row exists for `id`.
    fn archive(&self, id: ArtefactId) -> StoreResult<()>;

    /// Live rows whose display window closed before `today`.
    fn find_outdated(&self, today: NaiveDate) -> StoreResult<Vec<Artefact>>;

    /// Live rows whose display window opens exactly on `date`.
    fn find_by_display_from(&self, date: NaiveDate) -> StoreResult<Vec<Artefact>>;

    /// Live rows at the NoMatch sentinel location.
    fn find_all_no_match(&self) -> StoreResult<Vec<Artefact>>;

    /// Live rows at `location` currently inside their display window.
    fn find_active_for_location(
        &self,
        today: NaiveDate,
        location: LocationId,
    ) -> StoreResult<Vec<Artefact>>;

    /// Live rows at any of the given locations (bulk-cascade resolution).
    fn find_all_by_location_ids(&self, locations: &[LocationId]) -> StoreResult<Vec<Artefact>>;

    /// Look up an archived artefact by id (historical/MI queries).
    fn archived(&self, id: ArtefactId) -> StoreResult<Option<Artefact>>;

    /// All archived artefacts (historical/MI queries).
    fn all_archived(&self) -> StoreResult<Vec<Artefact>>;
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a published artefact (UUID v7 for time-ordering).
///
/// The id survives supersession: replacing an artefact's payload in place
/// keeps the same `ArtefactId` and bumps its superseded counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtefactId(uuid::Uuid);

impl ArtefactId {
    /// Generate a new time-ordered artefact ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of the UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for ArtefactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArtefactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtefactId({})", self.short_id())
    }
}

impl fmt::Display for ArtefactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved court/tribunal location.
///
/// Location resolution itself happens upstream; by the time an artefact
/// reaches this system its location is either a real id or the
/// [`LocationId::NO_MATCH`] sentinel. NoMatch artefacts are stored and
/// reported to operators but never distributed to subscribers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(i64);

impl LocationId {
    /// Sentinel for artefacts whose declared location did not resolve.
    pub const NO_MATCH: Self = Self(-1);

    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns `true` if this is the NoMatch sentinel.
    pub fn is_no_match(&self) -> bool {
        *self == Self::NO_MATCH
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_no_match() {
            write!(f, "LocationId(NoMatch)")
        } else {
            write!(f, "LocationId({})", self.0)
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LocationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Key into blob storage.
///
/// Keys are minted fresh for every write ([`BlobKey::fresh`]) and never
/// reused: an update writes the new payload under a new key and deletes the
/// old key only after the owning row has committed. Derived-file keys are
/// the deterministic exception, built from the artefact id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobKey(String);

impl BlobKey {
    /// Mint a fresh, never-before-used key (UUID v7 based).
    pub fn fresh() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Build a key from a known name (derived-file keys).
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ArtefactId, BlobKey, LocationId};
use crate::listing::{Language, ListType, Provenance, Sensitivity};

/// The dedup identity of an artefact.
///
/// At most one live artefact exists per tuple at any time. Equality is exact
/// on every field: a mismatch anywhere means a distinct artefact, never a
/// supersession. `content_date` is day-granular by construction
/// (`NaiveDate`), so day truncation cannot be bypassed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtefactIdentity {
    pub location_id: LocationId,
    pub content_date: NaiveDate,
    pub language: Language,
    pub list_type: ListType,
    pub provenance: Provenance,
}

/// One published list-document instance: relational metadata plus a
/// reference to its payload in blob storage.
///
/// Lifecycle: created by ingestion, superseded in place zero or more times
/// (same id, swapped payload, counter bumped), then archived or deleted.
/// While the record exists its `payload` key always resolves to a stored
/// blob; the creation path orders writes to keep that true under retries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artefact {
    pub artefact_id: ArtefactId,
    pub location_id: LocationId,
    pub provenance: Provenance,
    pub list_type: ListType,
    pub language: Language,
    pub sensitivity: Sensitivity,
    /// The sitting date the list covers (day granularity).
    pub content_date: NaiveDate,
    /// Start of the display window (inclusive, compared at day granularity).
    pub display_from: DateTime<Utc>,
    /// End of the display window (exclusive). `None` means open-ended.
    pub display_to: Option<DateTime<Utc>>,
    pub last_received: DateTime<Utc>,
    /// Current payload blob. Swapped wholesale on supersession.
    pub payload: BlobKey,
    pub payload_size: u64,
    /// Flat-file payloads are stored as-is and skip derived-file generation.
    pub is_flat_file: bool,
    /// How many times this artefact has been superseded. Starts at 0.
    pub superseded_count: u32,
}

impl Artefact {
    /// Build an ingestion candidate. Payload reference and size are filled
    /// in by the creation service once the blob write has happened.
    #[allow(clippy::too_many_arguments)]
    pub fn candidate(
        location_id: LocationId,
        provenance: Provenance,
        list_type: ListType,
        language: Language,
        sensitivity: Sensitivity,
        content_date: NaiveDate,
        display_from: DateTime<Utc>,
        display_to: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            artefact_id: ArtefactId::new(),
            location_id,
            provenance,
            list_type,
            language,
            sensitivity,
            content_date,
            display_from,
            display_to,
            last_received: display_from,
            payload: BlobKey::fresh(),
            payload_size: 0,
            is_flat_file: false,
            superseded_count: 0,
        }
    }

    /// Mark the candidate as a flat-file upload.
    pub fn flat_file(mut self) -> Self {
        self.is_flat_file = true;
        self
    }

    /// The dedup tuple for this artefact.
    pub fn identity(&self) -> ArtefactIdentity {
        ArtefactIdentity {
            location_id: self.location_id,
            content_date: self.content_date,
            language: self.language,
            list_type: self.list_type,
            provenance: self.provenance,
        }
    }

    /// Whether the artefact is inside its display window on `today`:
    /// `display_from <= today < display_to`, with an open upper bound when
    /// `display_to` is absent.
    pub fn is_trigger_eligible(&self, today: NaiveDate) -> bool {
        if self.display_from.date_naive() > today {
            return false;
        }
        match self.display_to {
            Some(to) => today < to.date_naive(),
            None => true,
        }
    }

    /// Whether the display window closed before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.display_to
            .is_some_and(|to| to.date_naive() < today)
    }

    /// Take over an existing artefact's identity for an in-place
    /// supersession: same stable id, counter bumped past the existing row.
    /// The candidate keeps its own (new) payload and metadata.
    pub fn supersede(&mut self, existing: &Artefact) {
        self.artefact_id = existing.artefact_id;
        self.superseded_count = existing.superseded_count + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    fn sample(display_from: DateTime<Utc>, display_to: Option<DateTime<Utc>>) -> Artefact {
        Artefact::candidate(
            LocationId::new(10),
            Provenance::CourtService,
            ListType::CivilDailyCauseList,
            Language::English,
            Sensitivity::Public,
            date(2024, 12, 16),
            display_from,
            display_to,
        )
    }

    // -----------------------------------------------------------------------
    // Identity tuple
    // -----------------------------------------------------------------------

    #[test]
    fn identical_metadata_has_equal_identity() {
        let a = sample(at(2024, 12, 15), None);
        let b = sample(at(2024, 12, 1), Some(at(2025, 1, 1)));
        // Display window and id differ; the dedup tuple does not.
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.artefact_id, b.artefact_id);
    }

    #[test]
    fn any_field_mismatch_is_a_distinct_identity() {
        let base = sample(at(2024, 12, 15), None);

        let mut other = base.clone();
        other.location_id = LocationId::new(11);
        assert_ne!(base.identity(), other.identity());

        let mut other = base.clone();
        other.content_date = date(2024, 12, 17);
        assert_ne!(base.identity(), other.identity());

        let mut other = base.clone();
        other.language = Language::Welsh;
        assert_ne!(base.identity(), other.identity());

        let mut other = base.clone();
        other.list_type = ListType::CrownDailyList;
        assert_ne!(base.identity(), other.identity());

        let mut other = base.clone();
        other.provenance = Provenance::ManualUpload;
        assert_ne!(base.identity(), other.identity());
    }

    // -----------------------------------------------------------------------
    // Display window
    // -----------------------------------------------------------------------

    #[test]
    fn eligible_once_display_from_reached() {
        let artefact = sample(at(2024, 12, 15), Some(at(2024, 12, 20)));
        assert!(!artefact.is_trigger_eligible(date(2024, 12, 14)));
        assert!(artefact.is_trigger_eligible(date(2024, 12, 15)));
        assert!(artefact.is_trigger_eligible(date(2024, 12, 16)));
    }

    #[test]
    fn display_to_is_exclusive() {
        let artefact = sample(at(2024, 12, 15), Some(at(2024, 12, 20)));
        assert!(artefact.is_trigger_eligible(date(2024, 12, 19)));
        assert!(!artefact.is_trigger_eligible(date(2024, 12, 20)));
    }

    #[test]
    fn open_ended_window_never_expires() {
        let artefact = sample(at(2024, 12, 15), None);
        assert!(artefact.is_trigger_eligible(date(2030, 1, 1)));
        assert!(!artefact.is_expired(date(2030, 1, 1)));
    }

    #[test]
    fn expired_only_after_display_to_has_passed() {
        let artefact = sample(at(2024, 12, 15), Some(at(2024, 12, 20)));
        assert!(!artefact.is_expired(date(2024, 12, 20)));
        assert!(artefact.is_expired(date(2024, 12, 21)));
    }

    #[test]
    fn expired_artefact_is_never_eligible() {
        let artefact = sample(at(2024, 12, 15), Some(at(2024, 12, 20)));
        for offset in 0..60 {
            let today = date(2024, 12, 1) + chrono::Days::new(offset);
            if artefact.is_expired(today) {
                assert!(!artefact.is_trigger_eligible(today), "on {today}");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Supersession
    // -----------------------------------------------------------------------

    #[test]
    fn supersede_copies_id_and_bumps_counter() {
        let existing = sample(at(2024, 12, 15), None);
        let mut candidate = sample(at(2024, 12, 15), None);
        let own_payload = candidate.payload.clone();

        candidate.supersede(&existing);

        assert_eq!(candidate.artefact_id, existing.artefact_id);
        assert_eq!(candidate.superseded_count, existing.superseded_count + 1);
        // The candidate's payload is untouched; the old one is the caller's
        // to delete after commit.
        assert_eq!(candidate.payload, own_payload);
    }

    #[test]
    fn counter_moves_by_one_per_supersession() {
        let mut current = sample(at(2024, 12, 15), None);
        assert_eq!(current.superseded_count, 0);
        for expected in 1..=3 {
            let mut next = sample(at(2024, 12, 15), None);
            next.supersede(&current);
            assert_eq!(next.superseded_count, expected);
            current = next;
        }
    }

    #[test]
    fn candidate_starts_unsuperseded() {
        let artefact = sample(at(2024, 12, 15), None);
        assert_eq!(artefact.superseded_count, 0);
        assert!(!artefact.is_flat_file);
        assert!(artefact.flat_file().is_flat_file);
    }

    #[test]
    fn serde_roundtrip() {
        let artefact = sample(at(2024, 12, 15), Some(at(2024, 12, 20)));
        let json = serde_json::to_string(&artefact).unwrap();
        let parsed: Artefact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, artefact);
    }

    mod window_properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn eligible_and_expired_are_mutually_exclusive(
                from_offset in 0u64..120,
                window_days in 0u64..120,
                today_offset in 0u64..240,
            ) {
                let epoch = date(2024, 1, 1);
                let from = at(2024, 1, 1) + chrono::Days::new(from_offset);
                let to = from + chrono::Days::new(window_days);
                let today = epoch + chrono::Days::new(today_offset);

                let artefact = sample(from, Some(to));
                prop_assert!(
                    !(artefact.is_trigger_eligible(today) && artefact.is_expired(today))
                );
            }

            #[test]
            fn eligibility_stops_at_or_before_expiry(
                from_offset in 0u64..120,
                window_days in 1u64..120,
            ) {
                let from = at(2024, 1, 1) + chrono::Days::new(from_offset);
                let to = from + chrono::Days::new(window_days);
                let artefact = sample(from, Some(to));

                // The day the window closes is already ineligible.
                prop_assert!(!artefact.is_trigger_eligible(to.date_naive()));
                // The day before it closes is still eligible.
                let last_day = to.date_naive() - chrono::Days::new(1);
                prop_assert!(artefact.is_trigger_eligible(last_day));
            }
        }
    }
}

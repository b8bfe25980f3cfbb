use std::fmt;

use docket_types::{ArtefactId, BlobKey};

/// The three derived files an artefact can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DerivedFileKind {
    /// The rendered PDF in the artefact's primary language.
    Primary,
    /// The Welsh-language companion PDF for bilingual publications.
    SecondaryLanguage,
    /// The spreadsheet rendering, for list types that have one.
    Spreadsheet,
}

impl DerivedFileKind {
    pub const ALL: [DerivedFileKind; 3] =
        [Self::Primary, Self::SecondaryLanguage, Self::Spreadsheet];
}

impl fmt::Display for DerivedFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::SecondaryLanguage => "secondary-language",
            Self::Spreadsheet => "spreadsheet",
        };
        write!(f, "{name}")
    }
}

/// Deterministic blob key for one of an artefact's derived files.
///
/// Unlike payload keys, these are reconstructable from the artefact id
/// alone, so cleanup never needs a lookup and deleting a kind the artefact
/// never rendered is a harmless no-op.
pub fn derived_key(artefact_id: ArtefactId, kind: DerivedFileKind) -> BlobKey {
    let name = match kind {
        DerivedFileKind::Primary => format!("{artefact_id}.pdf"),
        DerivedFileKind::SecondaryLanguage => format!("{artefact_id}-cy.pdf"),
        DerivedFileKind::Spreadsheet => format!("{artefact_id}.xlsx"),
    };
    BlobKey::named(name)
}

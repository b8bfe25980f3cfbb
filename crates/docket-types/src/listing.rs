use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of list a publication carries.
///
/// Closed set: every list type the system accepts is named here, so
/// per-list-type behaviour (spreadsheet rendering, formatting strategy)
/// can be resolved once at startup instead of dispatched dynamically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListType {
    CivilDailyCauseList,
    FamilyDailyCauseList,
    CrownDailyList,
    CrownWarnedList,
    MagistratesPublicList,
    SjpPublicList,
    EmploymentTribunalList,
}

impl ListType {
    /// Whether this list type also renders a spreadsheet alongside the PDF.
    pub fn has_spreadsheet(&self) -> bool {
        matches!(self, Self::SjpPublicList)
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CivilDailyCauseList => "CIVIL_DAILY_CAUSE_LIST",
            Self::FamilyDailyCauseList => "FAMILY_DAILY_CAUSE_LIST",
            Self::CrownDailyList => "CROWN_DAILY_LIST",
            Self::CrownWarnedList => "CROWN_WARNED_LIST",
            Self::MagistratesPublicList => "MAGISTRATES_PUBLIC_LIST",
            Self::SjpPublicList => "SJP_PUBLIC_LIST",
            Self::EmploymentTribunalList => "EMPLOYMENT_TRIBUNAL_LIST",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ListType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CIVIL_DAILY_CAUSE_LIST" => Ok(Self::CivilDailyCauseList),
            "FAMILY_DAILY_CAUSE_LIST" => Ok(Self::FamilyDailyCauseList),
            "CROWN_DAILY_LIST" => Ok(Self::CrownDailyList),
            "CROWN_WARNED_LIST" => Ok(Self::CrownWarnedList),
            "MAGISTRATES_PUBLIC_LIST" => Ok(Self::MagistratesPublicList),
            "SJP_PUBLIC_LIST" => Ok(Self::SjpPublicList),
            "EMPLOYMENT_TRIBUNAL_LIST" => Ok(Self::EmploymentTribunalList),
            other => Err(TypeError::UnknownValue {
                field: "list type",
                value: other.to_string(),
            }),
        }
    }
}

/// Language of a publication's rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    English,
    Welsh,
    Bilingual,
}

impl Language {
    /// The secondary rendering language, if the publication carries one.
    ///
    /// Bilingual publications render an additional Welsh document next to
    /// the primary one; single-language publications render only the primary.
    pub fn secondary(&self) -> Option<Language> {
        match self {
            Self::Bilingual => Some(Self::Welsh),
            Self::English | Self::Welsh => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::English => "ENGLISH",
            Self::Welsh => "WELSH",
            Self::Bilingual => "BILINGUAL",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Language {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENGLISH" => Ok(Self::English),
            "WELSH" => Ok(Self::Welsh),
            "BILINGUAL" => Ok(Self::Bilingual),
            other => Err(TypeError::UnknownValue {
                field: "language",
                value: other.to_string(),
            }),
        }
    }
}

/// Sensitivity classification controlling who may retrieve an artefact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    /// Readable by anyone, no authorization check.
    Public,
    /// Restricted to verified roles for the artefact's list type.
    Classified,
    /// Restricted to named parties only.
    Private,
}

impl Sensitivity {
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Where an artefact was ingested from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    CourtService,
    TribunalService,
    ManualUpload,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CourtService => "COURT_SERVICE",
            Self::TribunalService => "TRIBUNAL_SERVICE",
            Self::ManualUpload => "MANUAL_UPLOAD",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Provenance {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COURT_SERVICE" => Ok(Self::CourtService),
            "TRIBUNAL_SERVICE" => Ok(Self::TribunalService),
            "MANUAL_UPLOAD" => Ok(Self::ManualUpload),
            other => Err(TypeError::UnknownValue {
                field: "provenance",
                value: other.to_string(),
            }),
        }
    }
}

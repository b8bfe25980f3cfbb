use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a user retrieving restricted content.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is asking for an artefact's content.
///
/// Sensitivity gating resolves against this: `Public` artefacts are readable
/// by every caller, trusted `System` callers bypass the authorization check
/// entirely, and everything else requires a resolved user identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    /// Trusted internal caller (pipelines, sweeps). Bypasses authorization.
    System,
    /// A resolved end-user identity, checked against the authorization
    /// collaborator for non-public sensitivities.
    User(UserId),
    /// No identity supplied. Only public artefacts are readable.
    Anonymous,
}

impl Caller {
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_is_system() {
        assert!(Caller::System.is_system());
        assert!(!Caller::Anonymous.is_system());
        assert!(!Caller::User(UserId::new("u1")).is_system());
    }

    #[test]
    fn user_id_display() {
        let id = UserId::new("f54c9783");
        assert_eq!(id.to_string(), "f54c9783");
    }
}

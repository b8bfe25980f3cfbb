use serde::{Deserialize, Serialize};

/// Engine-level configuration, constructed at the composition root and
/// pushed down into the services.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Total creation attempts before an identity conflict is surfaced.
    pub max_create_attempts: u32,
    /// Payloads at or above this size skip derived-file generation.
    pub max_generation_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_create_attempts: 5,
            max_generation_bytes: 2 * 1024 * 1024,
        }
    }
}

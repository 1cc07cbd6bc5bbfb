//! Hook engine configuration.

use serde::{Deserialize, Serialize};

/// Hook engine configuration.
///
/// Immutable after initialization: set once before discovery runs,
/// read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Global kill switch. When `false`, firing an event is a complete
    /// no-op: no lookup, no log entries, no hook runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Root directory scanned by discovery. Must be set before `discover`
    /// is called without an explicit path.
    #[serde(default)]
    pub folder_path: String,
    /// Whether hook results are memoized per context fingerprint.
    #[serde(default = "default_true")]
    pub cache_results: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            folder_path: String::new(),
            cache_results: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

//! Cache backend configuration.

use serde::{Deserialize, Serialize};

/// Top-level cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache provider type. Currently only `"memory"` ships.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Default TTL for cached entries in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// In-memory cache configuration.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_ttl_seconds: default_ttl(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// In-memory cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries in the cache.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// TTL for in-memory entries in seconds.
    #[serde(default = "default_memory_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_memory_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_ttl() -> u64 {
    300
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_memory_ttl() -> u64 {
    300
}

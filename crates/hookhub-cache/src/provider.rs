//! Cache manager that dispatches to the configured store.

use std::sync::Arc;

use tracing::info;

use hookhub_core::config::cache::CacheConfig;
use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;
use hookhub_core::traits::cache::CacheStore;

/// Cache manager that wraps the configured cache store.
///
/// The store is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner cache store.
    inner: Arc<dyn CacheStore>,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheStore> = match config.provider.as_str() {
            "memory" => {
                info!("Initializing in-memory cache store");
                Arc::new(crate::memory::MemoryCacheStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a cache manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn CacheStore>) -> Self {
        Self { inner: store }
    }

    /// Get a reference to the inner store.
    pub fn store(&self) -> &dyn CacheStore {
        self.inner.as_ref()
    }
}

impl CacheStore for CacheManager {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.write(key, value)
    }

    fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key)
    }

    fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key)
    }

    fn flush_all(&self) -> AppResult<()> {
        self.inner.flush_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let config = CacheConfig {
            provider: "redis".to_string(),
            ..CacheConfig::default()
        };
        let err = CacheManager::new(&config).unwrap_err();
        assert_eq!(err.kind, hookhub_core::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_memory_provider_roundtrip() {
        let manager = CacheManager::new(&CacheConfig::default()).unwrap();
        manager.write("k", "v").unwrap();
        assert_eq!(manager.read("k").unwrap(), Some("v".to_string()));
        assert!(manager.exists("k").unwrap());
    }
}

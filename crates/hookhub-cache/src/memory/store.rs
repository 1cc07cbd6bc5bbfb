//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use hookhub_core::config::cache::MemoryCacheConfig;
use hookhub_core::result::AppResult;
use hookhub_core::traits::cache::CacheStore;

/// In-memory cache store using moka's synchronous cache.
///
/// Capacity and time-to-live bounds come from configuration; eviction is
/// moka's TinyLFU policy.
#[derive(Debug, Clone)]
pub struct MemoryCacheStore {
    /// The underlying moka cache.
    cache: Cache<String, String>,
}

impl MemoryCacheStore {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }
}

impl CacheStore for MemoryCacheStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key))
    }

    fn write(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key);
        Ok(())
    }

    fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        debug!("memory cache flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> MemoryCacheStore {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheStore::new(&config)
    }

    #[test]
    fn test_write_read() {
        let store = make_store();
        store.write("key1", "value1").unwrap();
        let val = store.read("key1").unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[test]
    fn test_read_missing() {
        let store = make_store();
        assert_eq!(store.read("nope").unwrap(), None);
    }

    #[test]
    fn test_exists() {
        let store = make_store();
        store.write("key2", "value2").unwrap();
        assert!(store.exists("key2").unwrap());
        assert!(!store.exists("other").unwrap());
    }

    #[test]
    fn test_delete() {
        let store = make_store();
        store.write("key3", "value3").unwrap();
        store.delete("key3").unwrap();
        assert_eq!(store.read("key3").unwrap(), None);
    }

    #[test]
    fn test_flush_all() {
        let store = make_store();
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        store.flush_all().unwrap();
        assert_eq!(store.read("a").unwrap(), None);
        assert_eq!(store.read("b").unwrap(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let store = make_store();
        let data = serde_json::json!({"name": "test", "count": 42});
        store.write_json("json_key", &data).unwrap();
        let result: Option<serde_json::Value> = store.read_json("json_key").unwrap();
        assert_eq!(result, Some(data));
    }
}

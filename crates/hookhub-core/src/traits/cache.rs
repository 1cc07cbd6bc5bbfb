//! Cache store trait for pluggable result-memoization backends.

use crate::result::AppResult;

/// Trait for cache backends.
///
/// Values are stored as JSON strings. Implementations own eviction:
/// capacity and TTL bounds are fixed at construction time from
/// configuration.
pub trait CacheStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value by key. `None` when the key is absent or expired.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value under a key.
    fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// Whether a key currently exists.
    fn exists(&self, key: &str) -> AppResult<bool>;

    /// Remove a key.
    fn delete(&self, key: &str) -> AppResult<()>;

    /// Drop every entry.
    fn flush_all(&self) -> AppResult<()>;

    /// Read a typed value by deserializing from JSON.
    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.read(key)? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Write a typed value by serializing to JSON.
    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.write(key, &json)
    }
}

//! Named hook constructors.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;

use hookhub_core::traits::hook::{Hook, HookFactory};

/// Set of named hook constructors.
///
/// Discovery records factory *keys*; the dispatcher resolves them here
/// when the event fires. Registration must complete before dispatch
/// begins for a discovered binding to resolve.
#[derive(Default)]
pub struct FactorySet {
    factories: DashMap<String, HookFactory>,
}

impl FactorySet {
    /// Creates an empty factory set.
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Registers a constructor under `key`, replacing any previous one
    /// with the same key (with a warning).
    pub fn register<F>(&self, key: &str, factory: F)
    where
        F: Fn() -> Box<dyn Hook> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(key.to_string(), Arc::new(factory))
            .is_some()
        {
            warn!(key, "factory replaced");
        }
    }

    /// Resolves a constructor by key.
    pub fn resolve(&self, key: &str) -> Option<HookFactory> {
        self.factories.get(key).map(|entry| entry.value().clone())
    }

    /// Whether a constructor is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for FactorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorySet")
            .field("registered", &self.factories.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookhub_core::result::AppResult;
    use serde_json::{Value, json};

    struct Fixed(i64);

    impl Hook for Fixed {
        fn execute(&self, _context: &Value) -> AppResult<Value> {
            Ok(json!(self.0))
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let set = FactorySet::new();
        set.register("fixed", || Box::new(Fixed(7)));

        let factory = set.resolve("fixed").unwrap();
        let hook = factory();
        assert_eq!(hook.execute(&Value::Null).unwrap(), json!(7));
    }

    #[test]
    fn test_resolve_missing() {
        let set = FactorySet::new();
        assert!(set.resolve("nope").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let set = FactorySet::new();
        set.register("fixed", || Box::new(Fixed(1)));
        set.register("fixed", || Box::new(Fixed(2)));
        assert_eq!(set.len(), 1);

        let hook = set.resolve("fixed").unwrap()();
        assert_eq!(hook.execute(&Value::Null).unwrap(), json!(2));
    }
}

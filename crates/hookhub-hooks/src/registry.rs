//! Hook registry — ordered, append-only bindings per event.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use hookhub_core::traits::hook::HookFactory;

use crate::activity::ActivityLog;

/// How a binding obtains its hook behavior at dispatch time.
#[derive(Clone)]
pub enum HookSource {
    /// A constructor supplied directly at bind time.
    Factory(HookFactory),
    /// A factory key recorded by discovery, resolved against the
    /// [`FactorySet`](crate::factory::FactorySet) when the event fires.
    Discovered {
        /// Factory key (the discovered file's stem).
        key: String,
        /// File the binding was discovered from.
        origin: PathBuf,
    },
}

impl fmt::Debug for HookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Discovered { key, origin } => f
                .debug_struct("Discovered")
                .field("key", key)
                .field("origin", origin)
                .finish(),
        }
    }
}

/// One hook bound to one event, at a fixed position in its firing order.
#[derive(Debug, Clone)]
pub struct HookBinding {
    /// Event the hook is bound to.
    pub event: String,
    /// Human-readable hook name.
    pub identifier: String,
    /// Deferred reference to the behavior.
    pub source: HookSource,
}

/// Registry of hook bindings organized by event name.
///
/// Bindings are append-only: there is no unbind. Within an event the
/// insertion order is the execution order and is never changed.
#[derive(Debug)]
pub struct HookRegistry {
    /// Event name → bindings in firing order.
    bindings: RwLock<HashMap<String, Vec<HookBinding>>>,
    /// Activity log receiving one entry per bind.
    log: Arc<ActivityLog>,
}

impl HookRegistry {
    /// Creates a new empty registry writing to the given activity log.
    pub fn new(log: Arc<ActivityLog>) -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
            log,
        }
    }

    /// Binds a hook to an event. Always succeeds.
    ///
    /// The first bind for an event creates its sequence. Binding the same
    /// identifier to the same event again appends a second entry — both
    /// will fire — with a warning so accidental doubles stay visible.
    pub fn bind(&self, event: &str, identifier: &str, source: HookSource) {
        {
            let mut bindings = self.bindings.write();
            let entries = bindings.entry(event.to_string()).or_default();

            if entries.iter().any(|b| b.identifier == identifier) {
                warn!(event, identifier, "duplicate binding appended");
            }

            entries.push(HookBinding {
                event: event.to_string(),
                identifier: identifier.to_string(),
                source,
            });
        }

        self.log
            .append(format!("[registry] hook '{identifier}' bound to event '{event}'"));
        info!(event, identifier, "hook bound");
    }

    /// All bindings for an event, in firing order.
    ///
    /// Returns an empty vector for events with no bindings — unknown
    /// events are not an error.
    pub fn lookup(&self, event: &str) -> Vec<HookBinding> {
        self.bindings.read().get(event).cloned().unwrap_or_default()
    }

    /// Whether any hooks are bound to the event.
    pub fn has_bindings(&self, event: &str) -> bool {
        self.bindings
            .read()
            .get(event)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Number of hooks bound to the event.
    pub fn binding_count(&self, event: &str) -> usize {
        self.bindings
            .read()
            .get(event)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// All event names with at least one binding.
    pub fn events(&self) -> Vec<String> {
        self.bindings.read().keys().cloned().collect()
    }
}

//! Engine facade — wires registry, discovery, dispatcher, cache, and log.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use hookhub_cache::CacheManager;
use hookhub_core::config::AppConfig;
use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;
use hookhub_core::traits::cache::CacheStore;
use hookhub_core::traits::hook::Hook;

use crate::activity::{ActivityLog, LogEntry};
use crate::discovery::HookDiscovery;
use crate::dispatcher::{DispatchOutcome, HookDispatcher};
use crate::factory::FactorySet;
use crate::registry::{HookRegistry, HookSource};
use crate::reporter::{ErrorReport, ErrorReporter};

/// Maximum number of error reports retained for diagnostics.
const REPORT_CAPACITY: usize = 1024;

/// The engine facade.
///
/// Owns the registry, factory set, discovery, dispatcher, activity log,
/// error reporter, and optional cache backend. Constructed explicitly
/// from configuration — there is no process-wide state, so tests and
/// hosts build as many isolated instances as they need.
#[derive(Debug)]
pub struct HookManager {
    registry: Arc<HookRegistry>,
    factories: Arc<FactorySet>,
    discovery: HookDiscovery,
    dispatcher: HookDispatcher,
    log: Arc<ActivityLog>,
    reporter: Arc<ErrorReporter>,
    cache: Option<Arc<CacheManager>>,
    folder_path: String,
}

impl HookManager {
    /// Builds an engine from configuration.
    ///
    /// The cache backend is only constructed when result caching is
    /// enabled.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let log = Arc::new(ActivityLog::new(config.logging.console_capacity));
        let reporter = Arc::new(ErrorReporter::new(Arc::clone(&log), REPORT_CAPACITY));
        let registry = Arc::new(HookRegistry::new(Arc::clone(&log)));
        let factories = Arc::new(FactorySet::new());

        let cache = if config.hooks.cache_results {
            Some(Arc::new(CacheManager::new(&config.cache)?))
        } else {
            None
        };

        let discovery = HookDiscovery::new(Arc::clone(&registry));
        let dispatcher = HookDispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&factories),
            Arc::clone(&log),
            Arc::clone(&reporter),
            cache.clone(),
            config.hooks.clone(),
        );

        info!(
            enabled = config.hooks.enabled,
            cache = config.hooks.cache_results,
            "hook engine initialized"
        );

        Ok(Self {
            registry,
            factories,
            discovery,
            dispatcher,
            log,
            reporter,
            cache,
            folder_path: config.hooks.folder_path.clone(),
        })
    }

    /// Binds a hook constructor to an event.
    pub fn bind<F>(&self, event: &str, identifier: &str, factory: F)
    where
        F: Fn() -> Box<dyn Hook> + Send + Sync + 'static,
    {
        self.registry
            .bind(event, identifier, HookSource::Factory(Arc::new(factory)));
    }

    /// Registers a named constructor for discovered bindings to resolve.
    pub fn register_factory<F>(&self, key: &str, factory: F)
    where
        F: Fn() -> Box<dyn Hook> + Send + Sync + 'static,
    {
        self.factories.register(key, factory);
    }

    /// Discovers hooks under the configured folder path.
    pub fn discover(&self) -> AppResult<usize> {
        if self.folder_path.is_empty() {
            return Err(AppError::configuration(
                "hooks.folder_path is not set; configure it before discovery",
            ));
        }
        self.discovery.discover(Path::new(&self.folder_path))
    }

    /// Discovers hooks under an explicit root, ignoring the configured
    /// path.
    pub fn discover_at(&self, root: &Path) -> AppResult<usize> {
        self.discovery.discover(root)
    }

    /// Fires every hook bound to `event` with the given context.
    pub fn fire(&self, event: &str, context: &Value) -> DispatchOutcome {
        self.dispatcher.fire(event, context)
    }

    /// Snapshot of the activity log, oldest first.
    pub fn read_log(&self) -> Vec<LogEntry> {
        self.log.read()
    }

    /// Snapshot of retained error reports, oldest first.
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reporter.reports()
    }

    /// The hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Releases resources held by the engine.
    ///
    /// Currently flushes the cache backend; reserved for further cleanup.
    pub fn shutdown(&self) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.flush_all() {
                warn!(error = %err, "cache flush failed during shutdown");
            }
        }
        self.log.append("[engine] shut down");
        info!("hook engine shut down");
    }
}

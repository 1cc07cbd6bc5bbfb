//! Hook dispatcher — fires an event's hooks synchronously, in order.
//!
//! Failure of one hook is caught, reported, and does not abort the
//! remaining hooks in the sequence. There is no halt or short-circuit
//! path: every resolved binding is visited exactly once per fire.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use hookhub_cache::{CacheManager, keys};
use hookhub_core::config::hooks::HooksConfig;
use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;
use hookhub_core::traits::cache::CacheStore;
use hookhub_core::traits::hook::Hook;

use crate::activity::ActivityLog;
use crate::factory::FactorySet;
use crate::registry::{HookBinding, HookRegistry, HookSource};
use crate::reporter::ErrorReporter;

/// Status of one hook within a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// The hook was constructed and executed.
    Executed,
    /// A memoized result was used; the hook body did not run.
    CacheHit,
    /// Construction or execution failed; the failure was reported.
    Failed,
}

/// Result of one hook within a dispatch.
#[derive(Debug, Clone)]
pub struct HookOutcome {
    /// The hook's identifier.
    pub identifier: String,
    /// What happened.
    pub status: HookStatus,
    /// Output value (present for `Executed` and `CacheHit`).
    pub output: Option<Value>,
    /// Failure message (present for `Failed`).
    pub error: Option<String>,
}

/// Aggregated result of one fire.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The event that was fired.
    pub event: String,
    /// `false` when the kill switch suppressed the dispatch entirely.
    pub fired: bool,
    /// Per-hook results, in firing order.
    pub outcomes: Vec<HookOutcome>,
}

impl DispatchOutcome {
    fn suppressed(event: &str) -> Self {
        Self {
            event: event.to_string(),
            fired: false,
            outcomes: Vec::new(),
        }
    }

    /// Number of hooks that executed (cache hits excluded).
    pub fn executed(&self) -> usize {
        self.count(HookStatus::Executed)
    }

    /// Number of hooks served from cache.
    pub fn cache_hits(&self) -> usize {
        self.count(HookStatus::CacheHit)
    }

    /// Number of hooks that failed.
    pub fn failed(&self) -> usize {
        self.count(HookStatus::Failed)
    }

    fn count(&self, status: HookStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Dispatches events to their bound hooks.
#[derive(Debug)]
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
    factories: Arc<FactorySet>,
    log: Arc<ActivityLog>,
    reporter: Arc<ErrorReporter>,
    cache: Option<Arc<CacheManager>>,
    config: HooksConfig,
}

impl HookDispatcher {
    /// Creates a dispatcher over the given components. `cache` is `None`
    /// when result caching is disabled.
    pub fn new(
        registry: Arc<HookRegistry>,
        factories: Arc<FactorySet>,
        log: Arc<ActivityLog>,
        reporter: Arc<ErrorReporter>,
        cache: Option<Arc<CacheManager>>,
        config: HooksConfig,
    ) -> Self {
        Self {
            registry,
            factories,
            log,
            reporter,
            cache,
            config,
        }
    }

    /// Fires every hook bound to `event`, in registration order, passing
    /// `context` to each.
    ///
    /// With the engine disabled this is a complete no-op: no lookup, no
    /// log entries, no hook runs. A hook failure never aborts the
    /// remaining hooks.
    pub fn fire(&self, event: &str, context: &Value) -> DispatchOutcome {
        if !self.config.enabled {
            debug!(event, "engine disabled, dispatch suppressed");
            return DispatchOutcome::suppressed(event);
        }

        self.log
            .append(format!("[dispatch] event '{event}' encountered"));
        self.log
            .append(format!("[dispatch] event '{event}' beginning to fire"));

        let bindings = self.registry.lookup(event);
        let mut outcomes = Vec::with_capacity(bindings.len());

        if bindings.is_empty() {
            self.log
                .append(format!("[dispatch] event '{event}' has no hooks attached"));
        } else {
            debug!(event, hooks = bindings.len(), "dispatching");
            for binding in &bindings {
                outcomes.push(self.run_one(event, binding, context));
            }
        }

        self.log
            .append(format!("[dispatch] event '{event}' finished processing"));
        info!(event, hooks = outcomes.len(), "dispatch complete");

        DispatchOutcome {
            event: event.to_string(),
            fired: true,
            outcomes,
        }
    }

    /// Runs a single binding: construct, consult the cache, execute.
    fn run_one(&self, event: &str, binding: &HookBinding, context: &Value) -> HookOutcome {
        let identifier = binding.identifier.as_str();
        let origin = format!("{event}/{identifier}");

        let hook = match self.construct(binding) {
            Ok(hook) => hook,
            Err(err) => return self.fail(&origin, identifier, err),
        };

        let cache_key = self.cache_key_for(hook.as_ref(), identifier, context);

        if let Some((cache, key)) = &cache_key {
            match cache.read(key) {
                Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                    Ok(output) => {
                        debug!(event, identifier, "cache hit");
                        self.log.append(format!(
                            "[dispatch] hook '{identifier}' result served from cache"
                        ));
                        return HookOutcome {
                            identifier: identifier.to_string(),
                            status: HookStatus::CacheHit,
                            output: Some(output),
                            error: None,
                        };
                    }
                    Err(err) => {
                        warn!(identifier, error = %err, "cached result unreadable, re-executing");
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    warn!(identifier, error = %err, "cache read failed, treating as miss");
                }
            }
        }

        match hook.execute(context) {
            Ok(output) => {
                if let Some((cache, key)) = &cache_key {
                    match serde_json::to_string(&output) {
                        Ok(raw) => {
                            if let Err(err) = cache.write(key, &raw) {
                                warn!(identifier, error = %err, "cache write failed");
                            }
                        }
                        Err(err) => {
                            warn!(identifier, error = %err, "result not serializable, skipping cache");
                        }
                    }
                }

                self.log
                    .append(format!("[dispatch] hook '{identifier}' executed"));
                HookOutcome {
                    identifier: identifier.to_string(),
                    status: HookStatus::Executed,
                    output: Some(output),
                    error: None,
                }
            }
            Err(err) => self.fail(&origin, identifier, err),
        }
    }

    /// Reports a per-hook failure and produces its outcome. The dispatch
    /// continues with the next binding.
    fn fail(&self, origin: &str, identifier: &str, err: AppError) -> HookOutcome {
        self.reporter.report(origin, &err);
        self.log.append(format!(
            "[dispatch] hook '{identifier}' failed: {}",
            err.message
        ));
        HookOutcome {
            identifier: identifier.to_string(),
            status: HookStatus::Failed,
            output: None,
            error: Some(err.message),
        }
    }

    /// Constructs the hook behavior from its deferred reference.
    fn construct(&self, binding: &HookBinding) -> AppResult<Box<dyn Hook>> {
        match &binding.source {
            HookSource::Factory(factory) => Ok(factory()),
            HookSource::Discovered { key, origin } => self
                .factories
                .resolve(key)
                .map(|factory| factory())
                .ok_or_else(|| {
                    AppError::hook_execution(format!(
                        "no factory registered for key '{}' (discovered from {})",
                        key,
                        origin.display()
                    ))
                }),
        }
    }

    /// Returns the cache handle and key when memoization applies to this
    /// invocation.
    fn cache_key_for(
        &self,
        hook: &dyn Hook,
        identifier: &str,
        context: &Value,
    ) -> Option<(Arc<CacheManager>, String)> {
        if !self.config.cache_results || !hook.cacheable() {
            return None;
        }
        let cache = self.cache.as_ref()?;
        let key = keys::hook_result(identifier, &keys::context_fingerprint(context));
        Some((Arc::clone(cache), key))
    }
}

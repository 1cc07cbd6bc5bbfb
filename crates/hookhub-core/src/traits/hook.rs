//! The hook capability contract.

use std::sync::Arc;

use serde_json::Value;

use crate::result::AppResult;

/// A unit of behavior bound to an event.
///
/// Implementations are constructed fresh for every dispatch through a
/// [`HookFactory`], so no state survives between invocations unless the
/// implementation itself reaches for external state.
pub trait Hook: Send + Sync {
    /// Single execution entry point, called with the opaque context value
    /// of one fire. The engine neither inspects nor mutates the context.
    fn execute(&self, context: &Value) -> AppResult<Value>;

    /// Whether the result may be memoized per context fingerprint.
    fn cacheable(&self) -> bool {
        true
    }
}

/// Deferred constructor for a hook behavior.
///
/// A binding stores *how to construct* the behavior, not a live instance;
/// the dispatcher calls the factory once per invocation.
pub type HookFactory = Arc<dyn Fn() -> Box<dyn Hook> + Send + Sync>;

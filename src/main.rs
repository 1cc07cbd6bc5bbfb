//! Hookhub host — demonstration entry point.
//!
//! Wires the engine the way a host application would: load configuration,
//! initialize tracing, register hook factories, run discovery, fire an
//! event, then dump the activity log.

use hookhub_core::config::AppConfig;
use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;
use hookhub_core::traits::hook::Hook;
use hookhub_hooks::HookManager;
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, fmt};

/// Records the login attempt.
#[derive(Debug)]
struct LogAttempt;

impl Hook for LogAttempt {
    fn execute(&self, context: &Value) -> AppResult<Value> {
        let user = context
            .get("user")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        tracing::info!(user, "login attempt recorded");
        Ok(json!({ "recorded": user }))
    }

    fn cacheable(&self) -> bool {
        false
    }
}

/// Queues a notification email about the login.
#[derive(Debug)]
struct SendSalesEmail;

impl Hook for SendSalesEmail {
    fn execute(&self, context: &Value) -> AppResult<Value> {
        let user = context
            .get("user")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        tracing::info!(user, "sales email queued");
        Ok(json!({ "queued": true }))
    }
}

fn main() {
    let env = std::env::var("HOOKHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config) {
        tracing::error!("Host error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main host run function.
fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Hookhub host v{}", env!("CARGO_PKG_VERSION"));

    let manager = HookManager::new(&config)?;

    // Constructors that discovered hook files resolve against.
    manager.register_factory("log_attempt", || Box::new(LogAttempt));
    manager.register_factory("send_sales_email", || Box::new(SendSalesEmail));

    // Direct bindings, independent of discovery.
    manager.bind("user_login", "log_attempt", || Box::new(LogAttempt));
    manager.bind("user_login", "send_sales_email", || Box::new(SendSalesEmail));

    if config.hooks.folder_path.is_empty() {
        tracing::info!("No hook folder configured, skipping discovery");
    } else {
        let bound = manager.discover()?;
        tracing::info!(bound, "discovery complete");
    }

    let outcome = manager.fire("user_login", &json!({ "user": "ray", "answer": 42 }));
    tracing::info!(
        executed = outcome.executed(),
        cache_hits = outcome.cache_hits(),
        failed = outcome.failed(),
        "event dispatched"
    );

    println!("── activity log ──");
    for entry in manager.read_log() {
        println!(
            "{:>4}  {}  {}",
            entry.seq,
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.message
        );
    }

    manager.shutdown();
    Ok(())
}

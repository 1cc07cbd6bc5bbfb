//! Integration tests for filesystem discovery: layout contract, ordering,
//! skip rules, and the rescan guard.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use hookhub_core::config::AppConfig;
use hookhub_core::error::ErrorKind;
use hookhub_core::result::AppResult;
use hookhub_core::traits::hook::Hook;
use hookhub_hooks::HookManager;

struct Noop;

impl Hook for Noop {
    fn execute(&self, _context: &Value) -> AppResult<Value> {
        Ok(json!("ok"))
    }
}

fn manager() -> HookManager {
    HookManager::new(&AppConfig::default()).unwrap()
}

/// Builds `<root>/<event>/<file>` trees for discovery.
fn hook_tree(entries: &[(&str, &str)]) -> TempDir {
    let root = TempDir::new().unwrap();
    for (event, file) in entries {
        let dir = root.path().join(event);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), "").unwrap();
    }
    root
}

#[test]
fn test_discovery_round_trip() {
    let root = hook_tree(&[
        ("login", "send_email.toml"),
        ("login", "log_attempt.toml"),
        ("logout", "notify.toml"),
    ]);

    let manager = manager();
    let bound = manager.discover_at(root.path()).unwrap();

    assert_eq!(bound, 3);
    assert_eq!(manager.registry().binding_count("login"), 2);
    assert_eq!(manager.registry().binding_count("logout"), 1);

    let identifiers: Vec<String> = manager
        .registry()
        .lookup("login")
        .into_iter()
        .map(|b| b.identifier)
        .collect();
    assert_eq!(identifiers, vec!["log_attempt", "send_email"]);
}

#[test]
fn test_discovered_hooks_fire_through_factories() {
    let root = hook_tree(&[("login", "audit.toml")]);

    let manager = manager();
    manager.register_factory("audit", || Box::new(Noop));
    manager.discover_at(root.path()).unwrap();

    let outcome = manager.fire("login", &json!({}));
    assert_eq!(outcome.executed(), 1);
    assert_eq!(outcome.outcomes[0].identifier, "audit");
}

#[test]
fn test_file_order_is_lexicographic() {
    let root = hook_tree(&[
        ("deploy", "zeta.sh"),
        ("deploy", "alpha.sh"),
        ("deploy", "midway.sh"),
    ]);

    let manager = manager();
    manager.discover_at(root.path()).unwrap();

    let identifiers: Vec<String> = manager
        .registry()
        .lookup("deploy")
        .into_iter()
        .map(|b| b.identifier)
        .collect();
    assert_eq!(identifiers, vec!["alpha", "midway", "zeta"]);
}

#[test]
fn test_missing_root_is_configuration_error() {
    let manager = manager();
    let err = manager
        .discover_at(Path::new("/definitely/not/a/real/path"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_unset_folder_path_is_configuration_error() {
    let manager = manager();
    let err = manager.discover().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_configured_folder_path_is_used() {
    let root = hook_tree(&[("login", "audit.toml")]);

    let mut config = AppConfig::default();
    config.hooks.folder_path = root.path().to_string_lossy().into_owned();
    let manager = HookManager::new(&config).unwrap();

    assert_eq!(manager.discover().unwrap(), 1);
}

#[test]
fn test_nested_directories_are_not_descended() {
    let root = hook_tree(&[("login", "audit.toml")]);
    let nested = root.path().join("login").join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("deep.toml"), "").unwrap();

    let manager = manager();
    let bound = manager.discover_at(root.path()).unwrap();

    assert_eq!(bound, 1);
    assert_eq!(manager.registry().binding_count("login"), 1);
}

#[test]
fn test_dot_entries_are_skipped() {
    let root = hook_tree(&[("login", "audit.toml")]);
    fs::write(root.path().join("login").join(".hidden.toml"), "").unwrap();
    fs::create_dir_all(root.path().join(".git")).unwrap();

    let manager = manager();
    let bound = manager.discover_at(root.path()).unwrap();

    assert_eq!(bound, 1);
    assert!(manager.registry().lookup(".git").is_empty());
}

#[test]
fn test_rediscovery_is_a_guarded_noop() {
    let root = hook_tree(&[("login", "audit.toml")]);

    let manager = manager();
    assert_eq!(manager.discover_at(root.path()).unwrap(), 1);
    assert_eq!(manager.discover_at(root.path()).unwrap(), 0);
    assert_eq!(manager.registry().binding_count("login"), 1);
}

#[test]
fn test_event_and_identifier_taken_verbatim() {
    let root = hook_tree(&[("CamelCase", "MixedName.Hook.toml")]);

    let manager = manager();
    manager.discover_at(root.path()).unwrap();

    let bindings = manager.registry().lookup("CamelCase");
    assert_eq!(bindings.len(), 1);
    // Only the final extension is stripped.
    assert_eq!(bindings[0].identifier, "MixedName.Hook");
}

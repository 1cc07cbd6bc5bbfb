//! Cache key builders for Hookhub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the engine uses.

use sha1::{Digest, Sha1};

/// Prefix applied to all Hookhub cache keys.
const PREFIX: &str = "hookhub";

/// Cache key for a memoized hook result.
pub fn hook_result(identifier: &str, fingerprint: &str) -> String {
    format!("{PREFIX}:result:{identifier}:{fingerprint}")
}

/// Fingerprint of a dispatch context.
///
/// Hashes the canonical JSON encoding, so two structurally equal contexts
/// produce the same fingerprint. serde_json emits object keys in sorted
/// order, which keeps the encoding canonical.
pub fn context_fingerprint(context: &serde_json::Value) -> String {
    let mut hasher = Sha1::new();
    hasher.update(context.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hook_result_key() {
        assert_eq!(
            hook_result("send_email", "abc123"),
            "hookhub:result:send_email:abc123"
        );
    }

    #[test]
    fn test_fingerprint_stable_for_equal_contexts() {
        let a = json!({"user": "ray", "attempt": 1});
        let b = json!({"attempt": 1, "user": "ray"});
        assert_eq!(context_fingerprint(&a), context_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_differs_for_different_contexts() {
        let a = json!({"user": "ray"});
        let b = json!({"user": "ren"});
        assert_ne!(context_fingerprint(&a), context_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_is_hex() {
        let fp = context_fingerprint(&json!(null));
        assert_eq!(fp.len(), 40);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

//! # hookhub-cache
//!
//! Cache store implementations for Hookhub. Ships one backend:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka)
//!
//! The store is selected at runtime based on configuration through the
//! [`CacheManager`]. The `CacheStore` seam in `hookhub-core` keeps the
//! door open for further backends.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;

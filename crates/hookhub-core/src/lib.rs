//! # hookhub-core
//!
//! Core crate for Hookhub. Contains the seam traits for hooks and cache
//! backends, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Hookhub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

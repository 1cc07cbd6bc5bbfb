//! Convenience result type alias for Hookhub.

use crate::error::AppError;

/// A specialized `Result` type for Hookhub operations, so that crates do
/// not need to spell out `Result<T, AppError>` everywhere.
pub type AppResult<T> = Result<T, AppError>;

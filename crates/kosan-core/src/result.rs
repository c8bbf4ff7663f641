//! Convenience result type alias for Kosan.

use crate::error::AppError;

/// A specialized `Result` type for Kosan operations.
pub type AppResult<T> = Result<T, AppError>;

//! Convenience result type alias for hookline.

use crate::error::HookError;

/// A specialized `Result` type for hook handlers and registry operations.
pub type HookResult<T> = Result<T, HookError>;

//! Unified error types for hookline.
//!
//! Hook handlers return [`HookError`] and the registry wraps whatever a
//! handler returns before handing it back to the `execute` caller, so a
//! single error type crosses every boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A hook handler failed and aborted the chain.
    HookFailed,
    /// A registered hook expects a different context type than the one executed.
    ContextMismatch,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HookFailed => write!(f, "HOOK_FAILED"),
            Self::ContextMismatch => write!(f, "CONTEXT_MISMATCH"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout hookline.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct HookError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HookError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a hook failure. Handlers use this to abort the chain.
    pub fn hook_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HookFailed, message)
    }

    /// Create a context type mismatch error.
    pub fn context_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContextMismatch, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Clone for HookError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for HookError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_kind() {
        let err = HookError::hook_failed("audit rejected request");
        assert_eq!(err.to_string(), "HOOK_FAILED: audit rejected request");
    }

    #[test]
    fn test_with_source_keeps_cause() {
        let io = std::io::Error::other("disk gone");
        let err = HookError::with_source(ErrorKind::Internal, "write failed", io);
        assert_eq!(err.kind(), ErrorKind::Internal);
        let cause = err.source().expect("source should be kept");
        assert_eq!(cause.to_string(), "disk gone");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = HookError::with_source(ErrorKind::HookFailed, "hook failed", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::HookFailed);
        assert_eq!(cloned.message, "hook failed");
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_from_serde_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: HookError = parse.into();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }
}

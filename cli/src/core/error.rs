//! # ScaffRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ScaffRS. The analysis
//! engine (`crate::analysis`) returns `ScaffError` directly so callers can match
//! on specific failures such as `InvalidTree`; command handlers work with the
//! `anyhow`-based `Result<T>` alias and add context as errors bubble up.
//!
//! ## Architecture
//!
//! - `ScaffError`: a closed `thiserror` enum covering tree validation,
//!   preference parsing, configuration, filesystem, templating and JSON errors.
//! - `Result<T>`: alias for `anyhow::Result<T>` used by command handlers.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error from the engine
//! return Err(ScaffError::InvalidTree("root is null".into()));
//!
//! // Add context in a command handler
//! let raw = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read tree file: {}", path.display()))?;
//!
//! // Match on an engine failure
//! match err.downcast_ref::<ScaffError>() {
//!     Some(ScaffError::InvalidTree(reason)) => eprintln!("bad tree: {reason}"),
//!     _ => return Err(err),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the ScaffRS application.
#[derive(Error, Debug)]
pub enum ScaffError {
    /// Malformed or cyclic input tree. Fatal to the single request, never retried.
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// An unrecognised preference token. Reported as a warning; never fails a call.
    #[error("Unknown preference token '{token}' (ignored)")]
    UnknownPreferenceToken { token: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let tree_err = ScaffError::InvalidTree("root is null".to_string());
        assert_eq!(tree_err.to_string(), "Invalid tree: root is null");

        let token_err = ScaffError::UnknownPreferenceToken {
            token: "use-svn".into(),
        };
        assert_eq!(
            token_err.to_string(),
            "Unknown preference token 'use-svn' (ignored)"
        );

        let config_err = ScaffError::Config("max_expected_depth must be > 0".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: max_expected_depth must be > 0"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: ScaffError = parse_err.into();
        assert!(matches!(err, ScaffError::Json { .. }));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}

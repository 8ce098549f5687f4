//! # Error Types
//!
//! Every fallible operation in `linkjail_core` returns [`JailError`]. Construction and
//! configuration errors are meant to abort sandbox-session setup; the containment
//! predicate itself ([`crate::escape::EscapeChecker::is_escape`]) never fails.

use std::path::PathBuf;

/// Errors raised while building or querying a boundary set.
#[derive(Debug, thiserror::Error)]
pub enum JailError {
    #[error("Boundary '{path}' is registered more than once")]
    DuplicateBoundary { path: String },

    #[error("Invalid path '{input}': {reason}")]
    InvalidPath { input: String, reason: String },

    #[error("Path '{to}' resolved from '{from}' escapes boundary '{boundary}'")]
    PathEscapesBoundary {
        from: String,
        to: String,
        boundary: String,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Unsupported config format for '{path}' (expected .toml or .json)")]
    UnsupportedConfigFormat { path: PathBuf },

    #[error("Invalid benchmark parameters: {0}")]
    InvalidBenchmark(String),

    #[error("Decision for '{from}' -> '{to}' disagrees with the reference table (expected escape = {expected})")]
    UnexpectedDecision {
        from: String,
        to: String,
        expected: bool,
    },
}

impl JailError {
    pub(crate) fn invalid_path(input: impl Into<String>, reason: impl Into<String>) -> Self {
        JailError::InvalidPath {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = JailError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_paths() {
        let err = JailError::PathEscapesBoundary {
            from: "a/b/l".into(),
            to: "a/c/boop".into(),
            boundary: "a/b".into(),
        };
        assert_eq!(
            err.to_string(),
            "Path 'a/c/boop' resolved from 'a/b/l' escapes boundary 'a/b'"
        );

        let err = JailError::invalid_path("", "path is empty");
        assert_eq!(err.to_string(), "Invalid path '': path is empty");
    }

    #[test]
    fn test_config_read_keeps_io_source() {
        use std::error::Error;

        let err = JailError::ConfigRead {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.toml"));
    }
}

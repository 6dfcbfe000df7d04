//! Error types for DocNav.
//!
//! Library crates use [`DocNavError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all DocNav operations.
#[derive(Debug, thiserror::Error)]
pub enum DocNavError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source failed to enumerate or read its files.
    #[error("source '{source_name}' failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    /// A file pattern did not compile.
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// More than one content file resolves to the same node location.
    #[error("ambiguous content for '{location}': both {first} and {second} map to it")]
    AmbiguousContent {
        location: String,
        first: String,
        second: String,
    },

    /// More than one order file is registered for the same directory.
    #[error("ambiguous order file for scope '{scope}': both {first} and {second} apply")]
    AmbiguousOrder {
        scope: String,
        first: String,
        second: String,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocNavError>;

impl DocNavError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a source error attributed to the named source.
    pub fn source_error(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `regex::Error` with the offending pattern.
    pub fn pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error signals a data-integrity fault in the corpus
    /// rather than an environmental failure.
    pub fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousContent { .. } | Self::AmbiguousOrder { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocNavError::config("missing sources");
        assert_eq!(err.to_string(), "config error: missing sources");

        let err = DocNavError::AmbiguousContent {
            location: "guide.intro".into(),
            first: "docs:guide/intro.md".into(),
            second: "extra:guide/intro.md".into(),
        };
        assert!(err.to_string().contains("guide.intro"));
        assert!(err.is_ambiguity());
    }

    #[test]
    fn io_error_is_not_ambiguity() {
        let err = DocNavError::io(
            "/tmp/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_ambiguity());
        assert!(err.to_string().contains("/tmp/missing"));
    }
}

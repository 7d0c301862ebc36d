//! Common error types used throughout imgforged.
//!
//! Startup failures (bad rules, bad dimensions) and per-job failures
//! (I/O, transform) share one enum so callers can match on the kind.

use std::path::PathBuf;

/// Common error type for imgforged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured folder rule failed validation.
    #[error("Invalid rule for {}: {reason}", .root.display())]
    InvalidRule {
        /// Root directory of the offending rule, as configured.
        root: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A dimension string could not be parsed.
    #[error("Invalid dimensions: {0:?}")]
    InvalidDimensions(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The image transform failed.
    #[error("Transform error: {0}")]
    Transform(String),
}

impl Error {
    /// Create a new InvalidRule error.
    pub fn invalid_rule<P: Into<PathBuf>, S: Into<String>>(root: P, reason: S) -> Self {
        Self::InvalidRule {
            root: root.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Transform error.
    pub fn transform<S: Into<String>>(msg: S) -> Self {
        Self::Transform(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

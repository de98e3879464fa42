//! MWD-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, MwdError>;

/// Top-level error type for modwatch.
#[derive(Debug, Error)]
pub enum MwdError {
    #[error("[MWD-1001] configuration source unreadable at {path}: {details}")]
    ConfigUnreadable { path: PathBuf, details: String },

    #[error("[MWD-1002] configuration error, {field} wasn't specified")]
    MissingField { field: &'static str },

    #[error("[MWD-1003] configuration error, invalid period: {value}")]
    InvalidPeriod { value: i64 },

    #[error("[MWD-1004] configuration error, invalid directory {path}: {details}")]
    InvalidDirectory { path: PathBuf, details: String },

    #[error("[MWD-2001] daemonization failed during {stage}: {details}")]
    Daemonize {
        stage: &'static str,
        details: String,
    },

    #[error("[MWD-2002] signal listener setup failed: {details}")]
    Signal { details: String },

    #[error("[MWD-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MwdError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigUnreadable { .. } => "MWD-1001",
            Self::MissingField { .. } => "MWD-1002",
            Self::InvalidPeriod { .. } => "MWD-1003",
            Self::InvalidDirectory { .. } => "MWD-1004",
            Self::Daemonize { .. } => "MWD-2001",
            Self::Signal { .. } => "MWD-2002",
            Self::Io { .. } => "MWD-3001",
        }
    }

    /// Whether this error came out of configuration loading. Configuration
    /// errors are fatal at startup but recoverable when hit during a reload.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigUnreadable { .. }
                | Self::MissingField { .. }
                | Self::InvalidPeriod { .. }
                | Self::InvalidDirectory { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

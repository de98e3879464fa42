//! Configuration loading and eager validation.
//!
//! The configuration is a small TOML file with two required keys:
//!
//! ```toml
//! period = 30
//! directory = "/srv/watched"
//! ```
//!
//! Validation happens entirely at load time: `period` must be a positive
//! integer and `directory` must be openable as a directory when the file is
//! read. No partially validated configuration is ever handed to a caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::errors::{MwdError, Result};

/// Canonical configuration location when no override is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/modwatch/config.toml";

/// Validated scan configuration. Immutable once constructed; a reload builds
/// a fresh instance and the previous one is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Seconds between scans. Always positive.
    pub period: u64,
    /// Root of the watched tree. Verified openable at load time.
    pub directory: PathBuf,
}

/// On-disk shape before validation. Both keys deserialize as `Option` so a
/// missing key is distinguishable from a file that fails to parse at all.
#[derive(Debug, Deserialize)]
struct RawConfig {
    period: Option<i64>,
    directory: Option<PathBuf>,
}

/// A configuration source: the file the daemon reads at startup and again on
/// every reload signal. Injected rather than hardcoded so tests can point it
/// at scratch files.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
}

impl ConfigSource {
    /// Source backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source backed by [`DEFAULT_CONFIG_PATH`].
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }

    /// Path this source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the configuration.
    ///
    /// # Errors
    /// - [`MwdError::ConfigUnreadable`] when the file cannot be read or parsed
    /// - [`MwdError::MissingField`] when `period` or `directory` is absent
    /// - [`MwdError::InvalidPeriod`] when `period` is zero or negative
    /// - [`MwdError::InvalidDirectory`] when `directory` cannot be opened as
    ///   a directory
    pub fn load(&self) -> Result<ScanConfig> {
        let text = fs::read_to_string(&self.path).map_err(|err| MwdError::ConfigUnreadable {
            path: self.path.clone(),
            details: err.to_string(),
        })?;

        let raw: RawConfig = toml::from_str(&text).map_err(|err| MwdError::ConfigUnreadable {
            path: self.path.clone(),
            details: err.to_string(),
        })?;

        let period = raw.period.ok_or(MwdError::MissingField { field: "period" })?;
        let period =
            u64::try_from(period).map_err(|_| MwdError::InvalidPeriod { value: period })?;
        if period == 0 {
            return Err(MwdError::InvalidPeriod { value: 0 });
        }

        let directory = raw.directory.ok_or(MwdError::MissingField {
            field: "directory",
        })?;

        // Existence is checked eagerly: open the directory and drop the
        // handle. A file, a dangling path, or an unreadable directory all
        // fail here rather than at the first scan.
        fs::read_dir(&directory).map_err(|err| MwdError::InvalidDirectory {
            path: directory.clone(),
            details: err.to_string(),
        })?;

        Ok(ScanConfig { period, directory })
    }
}

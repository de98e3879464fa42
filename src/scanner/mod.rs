//! Recursive tree walk and the modification-time predicate.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};

use crate::core::snapshot::ConfigCell;
use crate::logger::sink::{EventSink, Severity};

/// Human-readable timestamp format used in change notifications.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One detected change. Ephemeral: built, handed to the sink, forgotten.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Path of the qualifying regular file.
    pub path: PathBuf,
    /// When the scan observed the file.
    pub detected_at: DateTime<Local>,
    /// The file's modification time.
    pub modified_at: DateTime<Local>,
}

impl ChangeEvent {
    /// Single-line notification text.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "file: {} was modified at {}",
            self.path.display(),
            self.modified_at.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Recursive scanner over the watched tree.
///
/// Each scan is a strictly sequential depth-first walk. Every traversal
/// failure — vanished path, unreadable directory, metadata error — is a
/// silent local skip: the branch is abandoned and the walk continues, so a
/// scan always completes a full pass.
pub struct TreeScanner {
    config: Arc<ConfigCell>,
    sink: Arc<dyn EventSink>,
}

impl TreeScanner {
    /// Scanner reading `period` from `config` and reporting through `sink`.
    #[must_use]
    pub fn new(config: Arc<ConfigCell>, sink: Arc<dyn EventSink>) -> Self {
        Self { config, sink }
    }

    /// Walk `path` depth-first, reporting every regular file modified within
    /// the current window.
    ///
    /// The root itself is resolved through symlinks, so a watch directory
    /// that is a link to the real tree scans its target — the same tree the
    /// configuration probe accepted. Entries below the root are classified
    /// without following: symlinks, sockets, devices and other non-regular,
    /// non-directory entries are neither recursed into nor reported.
    /// Entries are visited in the order the directory listing yields them
    /// (platform-defined, not sorted).
    pub fn scan(&self, path: &Path) {
        let Ok(metadata) = fs::metadata(path) else {
            return;
        };
        self.visit(path, &metadata);
    }

    /// Recursion step: classify with `lstat` so links are never followed.
    fn scan_entry(&self, path: &Path) {
        let Ok(metadata) = fs::symlink_metadata(path) else {
            return;
        };
        self.visit(path, &metadata);
    }

    fn visit(&self, path: &Path, metadata: &fs::Metadata) {
        let file_type = metadata.file_type();

        if file_type.is_file() {
            let Ok(modified) = metadata.modified() else {
                return;
            };
            if self.recently_modified(modified) {
                let event = ChangeEvent {
                    path: path.to_path_buf(),
                    detected_at: Local::now(),
                    modified_at: DateTime::<Local>::from(modified),
                };
                self.sink.emit(Severity::Info, &event.message());
            }
        } else if file_type.is_dir() {
            let Ok(entries) = fs::read_dir(path) else {
                return;
            };
            for entry in entries.flatten() {
                self.scan_entry(&entry.path());
            }
        }
    }

    /// Evaluate the modification predicate against the configuration that is
    /// active *right now* — re-read on every call, so a reload that lands
    /// mid-scan changes the window for the remaining files of that pass.
    fn recently_modified(&self, modified: SystemTime) -> bool {
        let period = self.config.snapshot().period;
        let mtime = DateTime::<Utc>::from(modified).timestamp();
        modified_within(Utc::now().timestamp(), period, mtime)
    }
}

/// Strict window predicate: `now - period < mtime`. A file stamped exactly at
/// the window edge does not qualify.
fn modified_within(now: i64, period: u64, mtime: i64) -> bool {
    let period = i64::try_from(period).unwrap_or(i64::MAX);
    now.saturating_sub(period) < mtime
}

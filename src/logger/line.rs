//! Line formatting and the append-only file sink.

use std::fs::{self, File, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;

use crate::DAEMON_NAME;
use crate::core::errors::{MwdError, Result};
use crate::logger::sink::{EventSink, Severity};

/// Default log location for backgrounded runs.
pub const DEFAULT_LOG_PATH: &str = "/var/log/modwatchd.log";

/// Render one log line: timestamp, process identity with pid, severity tag,
/// message. Mirrors the classic syslog `ident[pid]` tagging.
#[must_use]
pub fn format_line(severity: Severity, message: &str) -> String {
    format!(
        "{} {}[{}] {}: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        DAEMON_NAME,
        std::process::id(),
        severity.label(),
        message
    )
}

/// Append-only file sink used once the daemon has detached from its terminal.
///
/// Write failures are dropped rather than surfaced — a daemon whose log
/// target fills up or disappears keeps scanning.
#[derive(Debug)]
pub struct LineFileSink {
    file: Mutex<Option<File>>,
}

impl LineFileSink {
    /// Open (or create) the log file in append mode. Parent directories are
    /// created as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| MwdError::io(path, err))?;
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|err| MwdError::io(path, err))?;
        Ok(Self {
            file: Mutex::new(Some(file)),
        })
    }
}

impl EventSink for LineFileSink {
    fn emit(&self, severity: Severity, message: &str) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{}", format_line(severity, message));
        }
    }

    fn release(&self) {
        if let Some(mut file) = self.file.lock().take() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LineFileSink, format_line};
    use crate::logger::sink::{EventSink, Severity};

    #[test]
    fn line_carries_identity_severity_and_timestamp() {
        let line = format_line(Severity::Error, "reload failed");
        assert!(line.contains("modwatchd["), "missing identity: {line}");
        assert!(line.contains("ERROR: reload failed"), "bad tail: {line}");
        // Timestamp prefix is `YYYY-MM-DD HH:MM:SS `.
        assert_eq!(line.as_bytes()[4], b'-');
        assert_eq!(line.as_bytes()[10], b' ');
        assert_eq!(line.as_bytes()[13], b':');
    }

    #[test]
    fn file_sink_appends_and_survives_release() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logs").join("daemon.log");

        let sink = LineFileSink::open(&path).expect("open sink");
        sink.emit(Severity::Info, "started");
        sink.emit(Severity::Info, "scanned");
        sink.release();
        // After release the sink is inert, not a panic source.
        sink.emit(Severity::Info, "dropped");

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "post-release line must not be written");
        assert!(lines[0].ends_with("INFO: started"));
        assert!(lines[1].ends_with("INFO: scanned"));
    }
}

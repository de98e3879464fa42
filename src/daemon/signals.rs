//! Signal listener: configuration reload on SIGHUP, shutdown on SIGTERM.
//!
//! Signal delivery is decoupled from the reload/shutdown logic: a dedicated
//! listener thread blocks on `signal-hook`'s iterator and runs the handling
//! on its own stack, so the scan loop never executes handler code between
//! arbitrary instructions. The observable ordering is unchanged — a reload
//! that lands mid-scan swaps the snapshot while the scan is running, and the
//! scan finishes against whatever snapshots it already holds.

use std::process;
use std::sync::Arc;
use std::thread;

use signal_hook::consts::{SIGHUP, SIGTERM};
use signal_hook::iterator::Signals;

use crate::core::config::ConfigSource;
use crate::core::errors::{MwdError, Result};
use crate::core::snapshot::ConfigCell;
use crate::logger::sink::{EventSink, Severity};

/// Handle to the spawned listener. Held for the life of the process; the
/// thread only ever exits through [`process::exit`].
pub struct SignalController {
    _listener: thread::JoinHandle<()>,
}

impl SignalController {
    /// Install the SIGHUP/SIGTERM listener.
    ///
    /// # Errors
    /// Fails if the signal iterator cannot be registered or the listener
    /// thread cannot be spawned — both startup-fatal.
    pub fn spawn(
        cell: Arc<ConfigCell>,
        source: ConfigSource,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let mut signals = Signals::new([SIGHUP, SIGTERM]).map_err(|err| MwdError::Signal {
            details: err.to_string(),
        })?;

        let listener = thread::Builder::new()
            .name("signal-listener".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    match signal {
                        SIGHUP => apply_reload(&cell, &source, sink.as_ref()),
                        SIGTERM => shutdown(sink.as_ref()),
                        _ => {}
                    }
                }
            })
            .map_err(|err| MwdError::Signal {
                details: err.to_string(),
            })?;

        Ok(Self {
            _listener: listener,
        })
    }
}

/// Re-read the configuration source and, on success, swap it in as the
/// active snapshot. On failure the previous configuration stays in effect
/// untouched — a failed reload never leaves the process without a valid
/// configuration. Scans already in flight keep the snapshots they hold; the
/// next cycle reads the new one.
pub fn apply_reload(cell: &ConfigCell, source: &ConfigSource, sink: &dyn EventSink) {
    match source.load() {
        Ok(config) => {
            sink.emit(
                Severity::Info,
                &format!(
                    "changing period and directory: period={} directory={}",
                    config.period,
                    config.directory.display()
                ),
            );
            cell.replace(config);
        }
        Err(err) => {
            sink.emit(
                Severity::Error,
                &format!("reload failed, keeping previous configuration: {err}"),
            );
        }
    }
}

/// Report the shutdown, release the sink, and exit 0. An in-progress scan is
/// abandoned wherever it happens to be; process teardown reclaims the rest.
fn shutdown(sink: &dyn EventSink) -> ! {
    sink.emit(Severity::Info, "daemon terminated");
    sink.release();
    process::exit(0);
}

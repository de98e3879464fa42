//! The atomically replaceable active-configuration snapshot.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::config::ScanConfig;

/// Holds the one "current" [`ScanConfig`].
///
/// Single writer (the signal listener, on a successful reload), many readers
/// (the scan loop, and the modification predicate on every evaluation). The
/// value is replaced wholesale as an `Arc` swap, never mutated in place, so a
/// reader can never observe a half-updated record. A reader that cloned the
/// `Arc` before a swap keeps the old snapshot for as long as it holds it —
/// which is exactly how an in-flight scan finishes against the pre-reload
/// directory while the predicate picks up the new period.
#[derive(Debug)]
pub struct ConfigCell {
    active: RwLock<Arc<ScanConfig>>,
}

impl ConfigCell {
    /// Cell initialized with the startup configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self {
            active: RwLock::new(Arc::new(config)),
        }
    }

    /// Clone a handle to the currently active configuration.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ScanConfig> {
        Arc::clone(&self.active.read())
    }

    /// Replace the active configuration. Readers holding the previous
    /// snapshot are unaffected; the next `snapshot()` sees the new value.
    pub fn replace(&self, config: ScanConfig) {
        *self.active.write() = Arc::new(config);
    }
}

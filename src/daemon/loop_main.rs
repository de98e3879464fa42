//! The periodic scan scheduler.

use std::thread;
use std::time::Duration;

use crate::core::snapshot::ConfigCell;
use crate::scanner::TreeScanner;

/// Run the scan loop forever: sleep one period, then scan the watched root.
///
/// Both `period` and `directory` are re-read from the active snapshot at the
/// top of each cycle, so a reload that lands during the sleep takes effect
/// on the very next scan. The scan itself is a synchronous unit of work; the
/// loop's only suspension point is the sleep.
pub fn run(cell: &ConfigCell, scanner: &TreeScanner) -> ! {
    loop {
        let period = cell.snapshot().period;
        thread::sleep(Duration::from_secs(period));

        let root = cell.snapshot().directory.clone();
        scanner.scan(&root);
    }
}

//! Event sink: single-line append-only logging with graceful degradation.

pub mod line;
pub mod sink;

pub use line::{DEFAULT_LOG_PATH, LineFileSink};
pub use sink::{EventSink, MemorySink, Severity, StderrSink};

//! Daemon subsystem: process backgrounding, signal handling, the periodic
//! scan loop.

#[cfg(unix)]
pub mod lifecycle;
pub mod loop_main;
#[cfg(feature = "daemon")]
pub mod signals;

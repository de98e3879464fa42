//! Core types: configuration, the active-config snapshot, error taxonomy.

pub mod config;
pub mod errors;
pub mod snapshot;

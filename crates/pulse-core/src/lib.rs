//! Pulse Core - Composite timer fan-out and timer backends
//!
//! This crate implements the timing layer:
//! - `CompositeTimer`: broadcasts one timing operation to N >= 2 delegate
//!   timers, so a single measured operation updates several independent
//!   metrics at once
//! - `LocalTimer`: a concrete in-process backend
//! - `TokioExecutor`: continuation scheduling on a tokio runtime

pub mod exec;
pub mod local;
pub mod multi;

pub use exec::*;
pub use local::*;
pub use multi::*;

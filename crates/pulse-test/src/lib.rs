//! Pulse Test Harness - Instrumented doubles for the timing layer
//!
//! This crate provides:
//! - `MockTimer` / `TimerEvent`: timer doubles recording every interaction
//!   in call order, with start/stop failure injection
//! - `QueueExecutor`: a continuation scheduler that holds tasks until
//!   released, for deterministic async assertions

pub mod exec;
pub mod mock;

pub use exec::*;
pub use mock::*;

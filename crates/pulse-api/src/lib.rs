//! Pulse API - Timer capability contracts
//!
//! This crate defines the contracts the timing layer is built from:
//! - `Timer` and `TimeContext` (a named duration metric and one in-flight
//!   measurement)
//! - `TimerExt` (scoped sync/async timing operations over any timer)
//! - `Executor` and `TimedFuture` (continuation scheduling for async timing)
//! - Error types

pub mod error;
pub mod exec;
pub mod timed;
pub mod timer;

pub use error::*;
pub use exec::*;
pub use timed::*;
pub use timer::*;

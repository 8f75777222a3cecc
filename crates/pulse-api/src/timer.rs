//! Timer and time-context capability contracts

use std::time::Duration;

use crate::PulseResult;

/// One in-flight measurement, scoped to a single `stop()`.
///
/// Stopping records the elapsed time into the owning timer. Implementations
/// must tolerate `stop()` being called more than once (no-op after the
/// first) and must tolerate the context being dropped without ever being
/// stopped - an abandoned context records nothing. Composite timers rely on
/// both properties and do not de-duplicate stops themselves.
pub trait TimeContext: Send {
    /// End the measurement, recording elapsed time into the owning timer
    fn stop(&mut self) -> PulseResult<()>;
}

impl std::fmt::Debug for dyn TimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeContext").finish_non_exhaustive()
    }
}

/// A named metric measuring elapsed durations of operations.
///
/// Implementations are assumed safe for concurrent use from multiple
/// callers. This is a documented precondition, not enforced here; composite
/// timers add no synchronization of their own.
pub trait Timer: Send + Sync {
    /// Begin a measurement, registering the start time internally
    fn start(&self) -> PulseResult<Box<dyn TimeContext>>;

    /// Record an externally measured duration directly, no context involved
    fn update(&self, elapsed: Duration) -> PulseResult<()>;

    /// Number of completed measurements
    fn count(&self) -> u64;

    /// Metric name
    fn name(&self) -> &str;
}

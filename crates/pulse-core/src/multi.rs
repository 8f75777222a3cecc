//! Composite timer - fans one timing operation out to several timers

use std::sync::Arc;
use std::time::Duration;

use pulse_api::{PulseError, PulseResult, TimeContext, Timer};

/// A timer that broadcasts every operation to a fixed list of delegates.
///
/// One measured operation updates several independent timers (different
/// backends, or different names/labels) atomically from the caller's
/// perspective. Delegates are shared by reference and fixed at
/// construction; fan-out runs sequentially in list order on the calling
/// thread, so the composite adds no synchronization of its own and is as
/// thread-safe as its delegates.
///
/// `name()` and `count()` return the first delegate's values as a
/// representative - a convention, not a consistency guarantee.
pub struct CompositeTimer {
    delegates: Vec<Arc<dyn Timer>>,
}

impl CompositeTimer {
    /// Build a composite over at least two delegates.
    ///
    /// Fails with [`PulseError::NotEnoughDelegates`] otherwise: a composite
    /// of 0 or 1 timers makes no sense, use the single timer directly.
    pub fn new(delegates: Vec<Arc<dyn Timer>>) -> PulseResult<Self> {
        if delegates.len() < 2 {
            return Err(PulseError::NotEnoughDelegates(delegates.len()));
        }
        Ok(CompositeTimer { delegates })
    }
}

impl Timer for CompositeTimer {
    /// Start every delegate in list order, collecting one context per
    /// delegate in the same order.
    ///
    /// If a delegate fails to start, the contexts already collected are
    /// stopped before the error propagates, so a partial failure cannot
    /// leak open measurements.
    fn start(&self) -> PulseResult<Box<dyn TimeContext>> {
        let mut contexts: Vec<Box<dyn TimeContext>> = Vec::with_capacity(self.delegates.len());
        for delegate in &self.delegates {
            match delegate.start() {
                Ok(context) => contexts.push(context),
                Err(err) => {
                    for started in &mut contexts {
                        if let Err(stop_err) = started.stop() {
                            tracing::warn!("stop failed while unwinding partial start: {}", stop_err);
                        }
                    }
                    return Err(err);
                }
            }
        }

        Ok(Box::new(CompositeContext { contexts }))
    }

    /// Broadcast an externally measured duration to every delegate in list
    /// order. The first delegate error propagates immediately; delegates
    /// are assumed not to fail on update.
    fn update(&self, elapsed: Duration) -> PulseResult<()> {
        for delegate in &self.delegates {
            delegate.update(elapsed)?;
        }
        Ok(())
    }

    fn count(&self) -> u64 {
        self.delegates[0].count()
    }

    fn name(&self) -> &str {
        self.delegates[0].name()
    }
}

/// The contexts collected by [`CompositeTimer::start`], stopped as one
struct CompositeContext {
    contexts: Vec<Box<dyn TimeContext>>,
}

impl TimeContext for CompositeContext {
    /// Stop every child in start order.
    ///
    /// A failing child does not prevent stopping the rest: the sweep always
    /// covers all children, the first error is returned afterwards and any
    /// further errors are logged.
    fn stop(&mut self) -> PulseResult<()> {
        let mut first_err = None;
        for context in &mut self.contexts {
            if let Err(err) = context.stop() {
                if first_err.is_none() {
                    first_err = Some(err);
                } else {
                    tracing::warn!("additional stop failure in fan-out: {}", err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

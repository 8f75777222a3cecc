//! Scoped timing operations over any [`Timer`]
//!
//! The four operations here are defined purely in terms of `start()` and
//! `stop()`, so every timer - composites included - exposes the same timing
//! surface and stays usable behind `dyn Timer`.

use std::future::Future;

use crate::{Executor, OpResult, TimedFuture, Timer};

/// Timing operations available on every [`Timer`].
///
/// Stop policy when both the operation and a `stop()` fail: the operation's
/// error wins and the stop failure is logged. On a success path a stop
/// failure propagates, since there is no operation error to preserve.
pub trait TimerExt: Timer {
    /// Time a synchronous operation.
    ///
    /// The measurement is stopped on every exit path; the operation's
    /// outcome is passed through unchanged after the stop.
    fn time<T, F>(&self, operation: F) -> OpResult<T>
    where
        F: FnOnce() -> OpResult<T>,
    {
        let mut context = self.start()?;
        match operation() {
            Ok(value) => {
                context.stop()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(stop_err) = context.stop() {
                    tracing::warn!("stop failed after operation error: {}", stop_err);
                }
                Err(err)
            }
        }
    }

    /// Time a synchronous operation, recording failures on a separate timer.
    ///
    /// Arms both a success measurement (on `self`) and a failure measurement
    /// (on `failure_timer`) up front. Exactly one of the two is stopped:
    /// the success context on success, the failure context on failure. The
    /// other context is abandoned unstopped - the failure timer is armed on
    /// every call but records only failed calls, and the success timer
    /// records only successful ones. Backends must tolerate the abandoned
    /// context (see [`TimeContext`](crate::TimeContext)).
    fn time_with_failure<T, F>(&self, operation: F, failure_timer: &dyn Timer) -> OpResult<T>
    where
        F: FnOnce() -> OpResult<T>,
    {
        let mut success_context = self.start()?;
        let mut failure_context = match failure_timer.start() {
            Ok(context) => context,
            Err(err) => {
                if let Err(stop_err) = success_context.stop() {
                    tracing::warn!("stop failed while unwinding armed context: {}", stop_err);
                }
                return Err(err.into());
            }
        };

        match operation() {
            Ok(value) => {
                success_context.stop()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(stop_err) = failure_context.stop() {
                    tracing::warn!("failure-path stop failed: {}", stop_err);
                }
                Err(err)
            }
        }
    }

    /// Time an operation that produces a future.
    ///
    /// The measurement is started before `operation` is invoked. If the
    /// invocation itself fails, the measurement is stopped and the error
    /// returned. Otherwise the completion work - stopping the context and
    /// settling the returned future with the inner outcome - runs as a
    /// continuation on `executor`. Elapsed time is recorded whether the
    /// inner future succeeds or fails.
    fn time_async<T, F, Fut>(&self, operation: F, executor: &dyn Executor) -> OpResult<TimedFuture<T>>
    where
        F: FnOnce() -> OpResult<Fut>,
        Fut: Future<Output = OpResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut context = self.start()?;
        match operation() {
            Ok(future) => {
                let (tx, timed) = TimedFuture::channel();
                executor.execute(Box::pin(async move {
                    let outcome = future.await;
                    if let Err(stop_err) = context.stop() {
                        tracing::warn!("stop failed in timing continuation: {}", stop_err);
                    }
                    // Receiver may be gone if the caller dropped the future.
                    let _ = tx.send(outcome);
                }));
                Ok(timed)
            }
            Err(err) => {
                if let Err(stop_err) = context.stop() {
                    tracing::warn!("stop failed after operation error: {}", stop_err);
                }
                Err(err)
            }
        }
    }

    /// Time an operation that produces a future, recording failures on a
    /// separate timer.
    ///
    /// Same dual-timer asymmetry as [`time_with_failure`]: once the inner
    /// future settles, success stops only the success context and failure
    /// stops only the failure context; the other is abandoned unstopped.
    /// A synchronous failure of `operation` stops the failure context and
    /// returns the error directly.
    ///
    /// [`time_with_failure`]: TimerExt::time_with_failure
    fn time_async_with_failure<T, F, Fut>(
        &self,
        operation: F,
        failure_timer: &dyn Timer,
        executor: &dyn Executor,
    ) -> OpResult<TimedFuture<T>>
    where
        F: FnOnce() -> OpResult<Fut>,
        Fut: Future<Output = OpResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut success_context = self.start()?;
        let mut failure_context = match failure_timer.start() {
            Ok(context) => context,
            Err(err) => {
                if let Err(stop_err) = success_context.stop() {
                    tracing::warn!("stop failed while unwinding armed context: {}", stop_err);
                }
                return Err(err.into());
            }
        };

        match operation() {
            Ok(future) => {
                let (tx, timed) = TimedFuture::channel();
                executor.execute(Box::pin(async move {
                    // Exactly one of the two contexts is stopped; the other
                    // is dropped unstopped when this task ends.
                    match future.await {
                        Ok(value) => {
                            if let Err(stop_err) = success_context.stop() {
                                tracing::warn!("stop failed in timing continuation: {}", stop_err);
                            }
                            let _ = tx.send(Ok(value));
                        }
                        Err(err) => {
                            if let Err(stop_err) = failure_context.stop() {
                                tracing::warn!("failure-path stop failed: {}", stop_err);
                            }
                            let _ = tx.send(Err(err));
                        }
                    }
                }));
                Ok(timed)
            }
            Err(err) => {
                if let Err(stop_err) = failure_context.stop() {
                    tracing::warn!("failure-path stop failed: {}", stop_err);
                }
                Err(err)
            }
        }
    }
}

impl<M: Timer + ?Sized> TimerExt for M {}

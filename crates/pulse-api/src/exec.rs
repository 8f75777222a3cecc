//! Continuation scheduling for asynchronous timing

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::{OpResult, PulseError};

/// A boxed continuation scheduled onto an [`Executor`]
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Where timing continuations run.
///
/// The async timing operations hand their completion work (stopping
/// contexts, settling the returned future) to an executor supplied by the
/// caller, so the timing layer is not tied to any particular runtime. An
/// executor is free to queue, defer, or drop tasks; a dropped task leaves
/// its [`TimedFuture`] settling with [`PulseError::CompletionDropped`].
pub trait Executor: Send + Sync {
    /// Schedule a continuation to run
    fn execute(&self, task: Task);
}

/// The future returned by the async timing operations.
///
/// Settles with the timed operation's exact outcome once the scheduled
/// continuation has run. The appropriate contexts are stopped inside the
/// continuation before this future can be observed complete. If the inner
/// future never completes, this never settles and the open measurements are
/// never stopped.
pub struct TimedFuture<T> {
    rx: oneshot::Receiver<OpResult<T>>,
}

impl<T> TimedFuture<T> {
    /// Create the future and the sender half its continuation settles
    pub fn channel() -> (oneshot::Sender<OpResult<T>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, TimedFuture { rx })
    }
}

impl<T> std::fmt::Debug for TimedFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedFuture").finish_non_exhaustive()
    }
}

impl<T> Future for TimedFuture<T> {
    type Output = OpResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(PulseError::CompletionDropped.into())),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timed_future_settles_with_sent_outcome() {
        let (tx, future) = TimedFuture::channel();
        tx.send(Ok(42u32)).ok();

        assert_eq!(future.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timed_future_dropped_sender_reports_completion_dropped() {
        let (tx, future) = TimedFuture::<u32>::channel();
        drop(tx);

        let err = future.await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PulseError>(),
            Some(PulseError::CompletionDropped)
        ));
    }
}

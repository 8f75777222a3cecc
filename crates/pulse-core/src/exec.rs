//! Tokio-backed continuation scheduler

use tokio::runtime::Handle;

use pulse_api::{Executor, Task};

/// An [`Executor`] that spawns timing continuations on a tokio runtime
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        TokioExecutor { handle }
    }

    /// Bind to the runtime of the calling context.
    ///
    /// Panics outside a tokio runtime, same as [`Handle::current`].
    pub fn current() -> Self {
        TokioExecutor::new(Handle::current())
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, task: Task) {
        self.handle.spawn(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pulse_api::{OpError, Timer, TimerExt};

    use crate::LocalTimer;

    #[tokio::test]
    async fn test_tokio_executor_runs_timing_continuations() {
        let timer = LocalTimer::new("async_requests");
        let executor = TokioExecutor::current();

        let future = timer
            .time_async(
                || {
                    Ok(async {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Ok::<_, OpError>("ready")
                    })
                },
                &executor,
            )
            .unwrap();

        assert_eq!(future.await.unwrap(), "ready");
        assert_eq!(timer.count(), 1);
        assert!(timer.total() >= Duration::from_millis(5));
    }
}

//! Deterministic executors for timing tests

use parking_lot::Mutex;

use pulse_api::{Executor, Task};

/// An executor that holds continuations until explicitly released.
///
/// Lets tests observe the window where an async timing operation has
/// returned its future but the completion work has not run yet: the future
/// stays pending and no context has been stopped. `release()` spawns the
/// held continuations on the ambient tokio runtime. Dropping the executor
/// with tasks still queued drops them unrun, which settles their futures
/// with `CompletionDropped`.
#[derive(Default)]
pub struct QueueExecutor {
    tasks: Mutex<Vec<Task>>,
}

impl QueueExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continuations currently held
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Spawn every held continuation; returns how many were released.
    ///
    /// Must be called from within a tokio runtime.
    pub fn release(&self) -> usize {
        let tasks: Vec<Task> = self.tasks.lock().drain(..).collect();
        let released = tasks.len();
        for task in tasks {
            tokio::spawn(task);
        }
        released
    }
}

impl Executor for QueueExecutor {
    fn execute(&self, task: Task) {
        self.tasks.lock().push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_queue_executor_holds_until_release() {
        let executor = QueueExecutor::new();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        executor.execute(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
        }));

        assert_eq!(executor.pending(), 1);
        assert!(!ran.load(Ordering::SeqCst));

        assert_eq!(executor.release(), 1);
        tokio::task::yield_now().await;
        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(executor.pending(), 0);
    }
}

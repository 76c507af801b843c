//! Cancellable handles for scheduled background work.
//!
//! Every timer the application starts is wrapped in a `TaskGuard`. The guard
//! aborts its task when cancelled or dropped, and does so exactly once.

use std::future::Future;

use {
    tokio::task::{JoinHandle, spawn},
    tracing::debug,
};

/// Owning handle for a spawned timer task.
#[derive(Debug)]
#[must_use = "dropping a TaskGuard cancels its task immediately"]
pub struct TaskGuard {
    /// Name used in log output.
    name: &'static str,
    /// Join handle of the running task, `None` once released.
    handle: Option<JoinHandle<()>>,
}

impl TaskGuard {
    /// Spawns `future` on the tokio runtime and returns a guard owning it.
    ///
    /// # Arguments
    ///
    /// * `name` - Short task name for diagnostics
    /// * `future` - The timer loop or delay to run
    ///
    /// # Returns
    ///
    /// A new `TaskGuard` that cancels the task when dropped.
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(task = name, "Scheduling task");
        Self {
            name,
            handle: Some(spawn(future)),
        }
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Cancels the task. Equivalent to dropping the guard.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(task = self.name, "Released task");
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering::SeqCst},
        },
        time::Duration,
    };

    use tokio::time::sleep;

    use crate::state::task::TaskGuard;

    #[tokio::test(start_paused = true)]
    async fn test_guard_runs_task_until_cancelled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task_counter = counter.clone();

        let guard = TaskGuard::spawn("counter", async move {
            loop {
                sleep(Duration::from_millis(100)).await;
                task_counter.fetch_add(1, SeqCst);
            }
        });
        assert_eq!(guard.name(), "counter");

        sleep(Duration::from_millis(350)).await;
        assert_eq!(counter.load(SeqCst), 3);

        guard.cancel();
        sleep(Duration::from_millis(1000)).await;
        assert_eq!(counter.load(SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task_counter = counter.clone();

        {
            let _guard = TaskGuard::spawn("scoped", async move {
                sleep(Duration::from_millis(100)).await;
                task_counter.fetch_add(1, SeqCst);
            });
        }

        sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_harmless() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task_counter = counter.clone();

        let guard = TaskGuard::spawn("once", async move {
            task_counter.fetch_add(1, SeqCst);
        });
        sleep(Duration::from_millis(10)).await;
        guard.cancel();
        assert_eq!(counter.load(SeqCst), 1);
    }
}

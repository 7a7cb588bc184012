//! Fixed-width worker pool for independent fetch tasks
//!
//! Every item becomes its own spawned tokio task, but no more than `width`
//! of them are in flight at once. Results come back in completion order.

use futures::stream::{self, StreamExt};
use std::future::Future;
use tokio::task::JoinError;
use tracing::warn;

use crate::errors::{FetchError, Result};

/// Run `task` for every item and wait for all of them to finish.
///
/// A task that panics is reported as [`FetchError::TaskPanicked`] for its
/// item, and one cancelled by the runtime as [`FetchError::TaskCancelled`];
/// the remaining tasks keep running.
pub async fn run<I, F, Fut, R>(items: I, width: usize, task: F) -> Vec<(String, Result<R>)>
where
    I: IntoIterator<Item = String>,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<R>> + Send + 'static,
    R: Send + 'static,
{
    let width = width.max(1);

    stream::iter(items)
        .map(|item| {
            let handle = tokio::spawn(task(item.clone()));
            async move {
                match handle.await {
                    Ok(result) => (item, result),
                    Err(e) => {
                        let err = join_failure(&item, e);
                        (item, Err(err))
                    }
                }
            }
        })
        .buffer_unordered(width)
        .collect()
        .await
}

fn join_failure(item: &str, e: JoinError) -> FetchError {
    warn!("Task for {} did not complete: {}", item, e);
    if e.is_panic() {
        FetchError::TaskPanicked(item.to_string())
    } else {
        FetchError::TaskCancelled(item.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("file-{}.rinha", i)).collect()
    }

    #[tokio::test]
    async fn test_runs_every_item() {
        let results = run(names(10), 3, |name| async move { Ok(name.len()) }).await;

        assert_eq!(results.len(), 10);
        let mut seen: Vec<_> = results.iter().map(|(name, _)| name.clone()).collect();
        seen.sort();
        let mut expected = names(10);
        expected.sort();
        assert_eq!(seen, expected);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_never_exceeds_width() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = run(names(12), 3, |_| {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        assert_eq!(results.len(), 12);
        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency was {}", peak);
        assert!(peak >= 2, "tasks did not overlap (peak {})", peak);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_others() {
        let results = run(names(5), 2, |name| async move {
            if name == "file-2.rinha" {
                Err(FetchError::FetchStatus {
                    name,
                    status: 500,
                })
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(results.len(), 5);
        let failed: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, "file-2.rinha");
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let results = run(names(3), 2, |name| async move {
            if name == "file-1.rinha" {
                panic!("boom");
            }
            Ok(())
        })
        .await;

        assert_eq!(results.len(), 3);
        let (name, result) = results
            .iter()
            .find(|(_, r)| r.is_err())
            .expect("one task should fail");
        assert_eq!(name, "file-1.rinha");
        assert!(matches!(result, Err(FetchError::TaskPanicked(_))));
    }

    #[tokio::test]
    async fn test_cancelled_task_is_not_reported_as_panic() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let e = handle.await.unwrap_err();

        let err = join_failure("fib.rinha", e);
        assert!(matches!(err, FetchError::TaskCancelled(ref name) if name == "fib.rinha"));
    }

    #[tokio::test]
    async fn test_zero_width_still_runs() {
        let results = run(names(2), 0, |_| async { Ok(()) }).await;
        assert_eq!(results.len(), 2);
    }
}

// ABOUTME: Cancellable delay-then-callback effects on the tokio runtime
// Fires at most once; dropping the handle cancels a callback that has not run yet

use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
pub struct DeferredAction {
    handle: JoinHandle<()>,
}

impl DeferredAction {
    /// Run `callback` once after `delay`. Fails outside a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Result<Self, TryCurrentError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = Handle::try_current()?;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Ok(Self { handle })
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("Cancelling deferred action");
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DeferredAction {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fires_once_after_delay() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let action = DeferredAction::schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(action.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_prevents_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let action = DeferredAction::schedule(Duration::from_millis(50), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        action.cancel();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        drop(
            DeferredAction::schedule(Duration::from_millis(50), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap(),
        );

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_schedule_outside_runtime_fails() {
        assert!(DeferredAction::schedule(Duration::from_millis(1), || {}).is_err());
    }
}

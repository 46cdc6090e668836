use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// State owned by a view that must not outlive it
#[async_trait]
pub trait ScopedView: Send + Sync + 'static {
    /// Drop any in-flight completion without waiting for a lock
    fn invalidate(&self);

    /// Return to the initial state
    async fn reset(&self);
}

/// Lifetime of one mounted view.
///
/// Closing or dropping the scope cancels its token, discards completions
/// still in flight and resets the bound orchestrator.
pub struct ViewScope<V: ScopedView> {
    token: CancellationToken,
    view: Arc<V>,
    closed: bool,
}

impl<V: ScopedView> ViewScope<V> {
    pub fn new(view: Arc<V>) -> Self {
        Self {
            token: CancellationToken::new(),
            view,
            closed: false,
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Token cancelled when the view goes away, for work tied to the view
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn close(mut self) {
        self.closed = true;
        self.token.cancel();
        self.view.invalidate();
        self.view.reset().await;
        debug!("View scope closed");
    }
}

impl<V: ScopedView> Drop for ViewScope<V> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.token.cancel();
        self.view.invalidate();

        // Finish the reset in the background when a runtime is around
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let view = self.view.clone();
            handle.spawn(async move { view.reset().await });
        }
    }
}

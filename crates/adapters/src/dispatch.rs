//! Fire-and-forget execution of network deliveries.

use fanlog_ports::BoxFuture;
use fanlog_shared::Result;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;

/// Spawns deliveries on the ambient tokio runtime without awaiting them.
///
/// Failures are traced at debug level and otherwise dropped. Without a
/// runtime the delivery is dropped as well.
#[derive(Debug, Clone, Default)]
pub struct FireAndForget {
    tracker: TaskTracker,
    draining: Arc<Mutex<()>>,
}

impl FireAndForget {
    /// Create a dispatcher with its own task tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `delivery` in the background; returns whether it was spawned.
    pub fn spawn(&self, sink: &'static str, delivery: BoxFuture<'static, Result<()>>) -> bool {
        let Ok(handle) = Handle::try_current() else {
            tracing::debug!(sink, "no async runtime; delivery dropped");
            return false;
        };
        self.tracker.spawn_on(
            async move {
                if let Err(error) = delivery.await {
                    tracing::debug!(sink, %error, "delivery failed");
                }
            },
            &handle,
        );
        true
    }

    /// Number of deliveries still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for every delivery spawned so far.
    ///
    /// Concurrent drains on clones of one dispatcher run one after another;
    /// the tracker is reopened before the next one closes it.
    pub async fn drain(&self) {
        let _draining = self.draining.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

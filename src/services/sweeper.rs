//! Owned background task that sweeps expired rate-limit windows.

use crate::services::{metrics::AppMetrics, rate_limit::RateLimiter};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::oneshot,
    task::{JoinError, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};

/// Handle to a running sweep task
///
/// Dropping the handle without calling [`RateLimitSweeper::shutdown`] also
/// stops the task, but without waiting for it.
pub struct RateLimitSweeper {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RateLimitSweeper {
    /// Run `cleanup()` on `limiter` every `interval`, starting one interval from now
    pub fn start(limiter: Arc<RateLimiter>, interval: Duration, metrics: Option<AppMetrics>) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let removed = limiter.cleanup();
                        let tracked = limiter.tracked_identifiers();
                        if let Some(metrics) = &metrics {
                            metrics.set_tracked_identifiers(tracked);
                        }
                        tracing::debug!(removed, tracked, "Swept expired rate-limit windows");
                    }
                }
            }

            tracing::debug!("Rate-limit sweeper stopped");
        });

        Self { shutdown_tx, handle }
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // The receiver is gone only if the task already exited.
        let _ = self.shutdown_tx.send(());
        self.handle.await
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

//! PurgeExpiredLinksHandler - drops link requests nobody finished.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::foundation::Timestamp;
use crate::domain::linkage::LinkageError;
use crate::ports::LinkRequestRepository;

pub struct PurgeExpiredLinksHandler {
    repository: Arc<dyn LinkRequestRepository>,
    ttl_secs: i64,
}

impl PurgeExpiredLinksHandler {
    pub fn new(repository: Arc<dyn LinkRequestRepository>, ttl_secs: u64) -> Self {
        Self {
            repository,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Deletes requests older than the TTL, returning how many were removed.
    pub async fn handle(&self) -> Result<u64, LinkageError> {
        let cutoff = Timestamp::now().minus_secs(self.ttl_secs);
        let purged = self.repository.delete_created_before(cutoff).await?;
        if purged > 0 {
            tracing::info!(purged, "expired link requests removed");
        }
        Ok(purged)
    }

    /// Purges every `interval` until `shutdown` flips to `true`.
    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    if let Err(err) = self.handle().await {
                        tracing::warn!(error = %err, "link request purge failed");
                    }
                }
            }
        }
        tracing::debug!("link request sweeper stopped");
    }
}

//! Linkage handshake timing

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct LinkageConfig {
    /// Link requests older than this are purged
    #[serde(default = "default_request_ttl")]
    pub request_ttl_secs: u64,

    /// How often the purge runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Per-subscriber queue length on the realtime hub
    #[serde(default = "default_subscriber_capacity")]
    pub subscriber_capacity: usize,
}

impl LinkageConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_ttl_secs == 0 || self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidLinkageTiming);
        }
        if self.subscriber_capacity == 0 {
            return Err(ValidationError::InvalidSubscriberCapacity);
        }
        Ok(())
    }
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self {
            request_ttl_secs: default_request_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            subscriber_capacity: default_subscriber_capacity(),
        }
    }
}

fn default_request_ttl() -> u64 {
    15 * 60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_subscriber_capacity() -> usize {
    16
}

//! Event publisher that keeps what it was given.

use std::sync::Mutex;

use crate::domain::linkage::LinkageEvent;
use crate::ports::EventPublisher;

#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    published: Mutex<Vec<LinkageEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<LinkageEvent> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }
}

impl EventPublisher for RecordingEventPublisher {
    fn publish(&self, event: LinkageEvent) {
        if let Ok(mut published) = self.published.lock() {
            published.push(event);
        }
    }
}

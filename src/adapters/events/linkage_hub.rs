//! Token-scoped fan-out of linkage events to live WebSocket connections.
//!
//! ```text
//! token-a ──► [sub 1: mpsc(16)] ──► browser tab 1
//!         └─► [sub 2: mpsc(16)] ──► browser tab 2
//! token-b ──► [sub 3: mpsc(16)] ──► browser tab 3
//! ```
//!
//! Publishing is synchronous `try_send`: a subscriber whose queue is full or
//! whose receiver is gone is unregistered on the spot, and nobody else waits
//! for it.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::foundation::LinkToken;
use crate::domain::linkage::LinkageEvent;
use crate::ports::EventPublisher;

/// Default per-subscriber queue length.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 16;

type SubscriberId = u64;

struct Subscriber {
    id: SubscriberId,
    sender: mpsc::Sender<LinkageEvent>,
}

struct HubInner {
    subscribers: DashMap<LinkToken, Vec<Subscriber>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl HubInner {
    fn unsubscribe(&self, token: &LinkToken, id: SubscriberId) {
        if let Some(mut subs) = self.subscribers.get_mut(token) {
            subs.retain(|s| s.id != id);
        }
        self.subscribers.remove_if(token, |_, subs| subs.is_empty());
    }
}

/// Registry of token subscriptions. Cheap to clone.
#[derive(Clone)]
pub struct LinkageHub {
    inner: Arc<HubInner>,
}

impl LinkageHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                subscribers: DashMap::new(),
                next_id: AtomicU64::new(1),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Starts watching `token`. Dropping the subscription unregisters it.
    pub fn subscribe(&self, token: LinkToken) -> LinkageSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.inner.capacity);
        self.inner
            .subscribers
            .entry(token)
            .or_default()
            .push(Subscriber { id, sender });

        tracing::debug!(token = %token, subscriber = id, "linkage subscriber registered");
        LinkageSubscription {
            token,
            id,
            receiver,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscribers for `token`.
    pub fn subscriber_count(&self, token: &LinkToken) -> usize {
        self.inner
            .subscribers
            .get(token)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Number of tokens with at least one subscriber.
    pub fn watched_tokens(&self) -> usize {
        self.inner.subscribers.len()
    }
}

impl Default for LinkageHub {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_CAPACITY)
    }
}

impl EventPublisher for LinkageHub {
    fn publish(&self, event: LinkageEvent) {
        let token = event.token();
        if let Some(mut subs) = self.inner.subscribers.get_mut(&token) {
            subs.retain(|sub| match sub.sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(token = %token, subscriber = sub.id, "subscriber lagging, dropped");
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            });
        }
        self.inner
            .subscribers
            .remove_if(&token, |_, subs| subs.is_empty());
    }
}

/// One connection's view of a token's events.
pub struct LinkageSubscription {
    token: LinkToken,
    id: SubscriberId,
    receiver: mpsc::Receiver<LinkageEvent>,
    hub: Weak<HubInner>,
}

impl LinkageSubscription {
    pub fn token(&self) -> LinkToken {
        self.token
    }

    /// Next event, or `None` once the hub has dropped this subscriber.
    pub async fn recv(&mut self) -> Option<LinkageEvent> {
        self.receiver.recv().await
    }
}

impl Drop for LinkageSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(&self.token, self.id);
            tracing::debug!(token = %self.token, subscriber = self.id, "linkage subscriber released");
        }
    }
}

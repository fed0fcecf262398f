//! EventPublisher port - fan-out of linkage events to live watchers.

use crate::domain::linkage::LinkageEvent;

/// Publishes linkage events to whoever is watching the token.
///
/// Publishing never blocks and never fails: a watcher that cannot keep up
/// is dropped rather than slowing the publisher down.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: LinkageEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn EventPublisher>();
    }
}

//! Event bus for broadcasting domain events to subscribers
//!
//! Built on a tokio broadcast channel: every subscriber owns an
//! independent receiver, so a slow or failing subscriber cannot block
//! delivery to the others. The bus is created at startup and injected;
//! there is no module-global instance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::domain::events::{DomainEvent, EventMessage};

const DEFAULT_CAPACITY: usize = 1024;

/// Event bus for broadcasting domain events to all subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish an event to all current subscribers. Having no
    /// subscribers is not an error.
    pub fn publish(&self, event: DomainEvent) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let aggregate_id = message.event.aggregate_id();

        match self.sender.send(message) {
            Ok(count) => {
                debug!(
                    event_type,
                    %aggregate_id,
                    subscribers = count,
                    "Event published"
                );
            }
            Err(_) => {
                debug!(event_type, %aggregate_id, "Event published (no subscribers)");
            }
        }
    }

    pub fn subscribe(&self) -> EventSubscriber {
        let receiver = self.sender.subscribe();
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        let count = self.subscriber_count.load(Ordering::SeqCst);
        info!(total = count, "New event subscriber");

        EventSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event subscriber that receives events from the bus
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventSubscriber {
    /// Receive the next event. Lagged subscribers skip missed messages
    /// with a warning instead of stalling the bus.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(missed = count, "Subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return None;
                }
            }
        }
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        let prev = self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
        info!(remaining = prev - 1, "Event subscriber disconnected");
    }
}

/// Shared event bus type
pub type SharedEventBus = Arc<EventBus>;

/// Create a shared event bus
pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::CertificateRevokedEvent;
    use crate::domain::CertificateId;
    use chrono::Utc;
    use std::time::Duration;

    fn revoked_event() -> DomainEvent {
        DomainEvent::CertificateRevoked(CertificateRevokedEvent {
            aggregate_id: CertificateId::new(),
            reason: "test".to_string(),
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();

        bus.publish(revoked_event());

        let received = tokio::time::timeout(Duration::from_millis(100), subscriber.recv())
            .await
            .expect("timeout")
            .expect("no message");
        assert_eq!(received.event.event_type(), "certificate_revoked");
    }

    #[tokio::test]
    async fn each_subscriber_gets_its_own_copy() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(revoked_event());

        for sub in [&mut first, &mut second] {
            let received = tokio::time::timeout(Duration::from_millis(100), sub.recv())
                .await
                .expect("timeout")
                .expect("no message");
            assert_eq!(received.event.event_type(), "certificate_revoked");
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.publish(revoked_event());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn dropping_subscriber_decrements_count() {
        let bus = EventBus::new();
        let subscriber = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(subscriber);
        assert_eq!(bus.subscriber_count(), 0);
    }
}

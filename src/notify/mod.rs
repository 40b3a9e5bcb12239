use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 32;

/// Per-provider broadcast channels, the in-process counterpart of a
/// socket room per user id. Delivery is at-most-once and best-effort:
/// publishing to a provider nobody listens to is not an error.
#[derive(Clone, Default)]
pub struct NotificationHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<String>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener to `provider_id`'s channel, creating the
    /// channel on first use.
    pub fn subscribe(&self, provider_id: Uuid) -> broadcast::Receiver<String> {
        let mut channels = self.channels.lock().expect("notification channel map poisoned");
        channels
            .entry(provider_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Fire-and-forget publish. A missing channel or one without live
    /// receivers is only logged; the caller never sees a failure.
    pub fn publish(&self, provider_id: Uuid, message: &str) {
        let sender = {
            let channels = self.channels.lock().expect("notification channel map poisoned");
            channels.get(&provider_id).cloned()
        };

        match sender {
            Some(tx) => {
                if tx.send(message.to_string()).is_err() {
                    debug!(%provider_id, "notification dropped: no live listeners");
                }
            }
            None => debug!(%provider_id, "notification dropped: provider has no channel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_message() {
        let hub = NotificationHub::new();
        let provider_id = Uuid::new_v4();
        let mut rx = hub.subscribe(provider_id);

        hub.publish(provider_id, "new booking");

        assert_eq!(rx.recv().await.expect("message delivered"), "new booking");
    }

    #[tokio::test]
    async fn publish_without_listener_is_silent() {
        let hub = NotificationHub::new();

        // Neither a missing channel nor a drained one may error.
        hub.publish(Uuid::new_v4(), "nobody home");

        let provider_id = Uuid::new_v4();
        let rx = hub.subscribe(provider_id);
        drop(rx);
        hub.publish(provider_id, "listener left");
    }

    #[tokio::test]
    async fn channels_are_isolated_per_provider() {
        let hub = NotificationHub::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut rx_first = hub.subscribe(first);
        let mut rx_second = hub.subscribe(second);

        hub.publish(first, "for the first provider");

        assert_eq!(
            rx_first.recv().await.expect("message delivered"),
            "for the first provider"
        );
        assert!(rx_second.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_subscriber_of_a_provider_receives() {
        let hub = NotificationHub::new();
        let provider_id = Uuid::new_v4();
        let mut rx_a = hub.subscribe(provider_id);
        let mut rx_b = hub.subscribe(provider_id);

        hub.publish(provider_id, "fan out");

        assert_eq!(rx_a.recv().await.expect("delivered"), "fan out");
        assert_eq!(rx_b.recv().await.expect("delivered"), "fan out");
    }
}

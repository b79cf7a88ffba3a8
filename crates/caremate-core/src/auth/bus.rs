//! Broadcast bus for auth state changes.
//!
//! Built on `tokio::sync::broadcast`. Interested components subscribe at
//! startup and unregister by dropping their receiver; there is no hidden
//! global registry. Publishing with no active subscribers is a no-op.

use caremate_types::user::User;
use tokio::sync::broadcast;
use uuid::Uuid;

/// An auth state change visible to subscribers.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn { user: User },
    SignedOut { user_id: Uuid },
}

/// Multi-consumer bus for auth state changes.
///
/// Cloning the bus clones the sender, allowing multiple producers and
/// consumers.
pub struct AuthEventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEventBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a subscriber for all future auth events.
    ///
    /// Dropping the receiver unregisters it.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Clone for AuthEventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for AuthEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEventBus")
            .field("subscriber_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthEvent {
        AuthEvent::SignedIn {
            user: User::new("ada@example.com".to_string(), None),
        }
    }

    #[tokio::test]
    async fn publish_and_subscribe_delivers_event() {
        let bus = AuthEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(signed_in());

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, AuthEvent::SignedIn { .. }));
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive_event() {
        let bus = AuthEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let user_id = Uuid::now_v7();
        bus.publish(AuthEvent::SignedOut { user_id });

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.unwrap() {
                AuthEvent::SignedOut { user_id: id } => assert_eq!(id, user_id),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn dropping_receiver_unregisters_it() {
        let bus = AuthEventBus::new(16);
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);

        // Publishing with no subscribers must not panic.
        bus.publish(signed_in());
    }

    #[tokio::test]
    async fn clone_shares_channel() {
        let bus = AuthEventBus::new(16);
        let bus2 = bus.clone();
        let mut rx = bus.subscribe();

        bus2.publish(signed_in());
        assert!(rx.try_recv().is_ok());
    }
}

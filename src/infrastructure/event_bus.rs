use crate::domain::events::{EventListener, JournalEvent};
use std::sync::Arc;
use tokio::sync::RwLock;

type Listeners = Vec<Arc<dyn EventListener>>;

/// Fans journal events out to every subscribed listener.
///
/// Clones share one subscriber list, so a listener registered through any
/// handle sees events published through all of them.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<RwLock<Listeners>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, listener: Arc<dyn EventListener>) {
        self.listeners.write().await.push(listener);
    }

    /// Delivers `event` in subscription order and returns how many listeners
    /// received it. Listeners run after the subscriber lock is released.
    pub async fn publish(&self, event: JournalEvent) -> usize {
        let listeners: Listeners = self.listeners.read().await.clone();
        for listener in &listeners {
            listener.on_event(&event);
        }
        listeners.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.listeners.read().await.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::events::LoggingListener;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Records every event it receives
    #[derive(Default)]
    pub(crate) struct RecordingListener {
        pub events: Mutex<Vec<JournalEvent>>,
    }

    impl EventListener for RecordingListener {
        fn on_event(&self, event: &JournalEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[tokio::test]
    async fn test_event_bus_subscribe() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count().await, 0);

        bus.subscribe(Arc::new(LoggingListener)).await;
        assert_eq!(bus.subscriber_count().await, 1);

        bus.subscribe(Arc::new(LoggingListener)).await;
        assert_eq!(bus.subscriber_count().await, 2);
    }

    #[tokio::test]
    async fn test_event_bus_publish_reaches_every_listener() {
        let bus = EventBus::new();
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());

        bus.subscribe(first.clone()).await;
        bus.subscribe(second.clone()).await;

        let event = JournalEvent::TradeClosed {
            trade_id: "t-1".to_string(),
            asset: "NVDA".to_string(),
            pnl: dec!(42.5),
        };
        assert_eq!(bus.publish(event.clone()).await, 2);

        assert_eq!(*first.events.lock().unwrap(), vec![event.clone()]);
        assert_eq!(*second.events.lock().unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn test_event_bus_clone() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        bus1.subscribe(Arc::new(LoggingListener)).await;

        // Clone should share the same listeners
        assert_eq!(bus2.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_publish_without_listeners() {
        let bus = EventBus::default();
        let delivered = bus
            .publish(JournalEvent::GoalDeleted {
                goal_id: "g-1".to_string(),
            })
            .await;
        assert_eq!(delivered, 0);
    }
}

//! In-process event bus.
//!
//! Cross-module side effects travel through this explicit channel: handlers
//! publish envelopes, registered subscribers receive them synchronously in
//! registration order. The bus also records everything it delivered, which
//! the tests use for assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Synchronous, in-process [`EventPublisher`] + [`EventSubscriber`].
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    /// Every envelope published so far, for assertions.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Published envelopes of one type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Whether at least one envelope of the given type went out.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published_events()
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn event_count(&self) -> usize {
        self.published_events().len()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Event log lock poisoned"))?
            .push(event.clone());

        // Handlers are cloned out so the lock is not held across awaits.
        let subscribed: Vec<Arc<dyn EventHandler>> = {
            let handlers = self.handlers.read().map_err(|_| {
                DomainError::new(ErrorCode::InternalError, "Handler registry lock poisoned")
            })?;
            handlers.get(&event.event_type).cloned().unwrap_or_default()
        };

        let mut failures = Vec::new();
        for handler in subscribed {
            if let Err(e) = handler.handle(event.clone()).await {
                failures.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !failures.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Event handler failures: {}", failures.join(", ")),
            ));
        }
        Ok(())
    }

    async fn publish_batch(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(handler);
        }
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        if let Ok(mut handlers) = self.handlers.write() {
            for event_type in event_types {
                handlers
                    .entry(event_type.to_string())
                    .or_default()
                    .push(Arc::clone(&handler));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Booking", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    #[tokio::test]
    async fn publish_records_and_routes_by_type() {
        let bus = InMemoryEventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        bus.subscribe("booking.created.v1", Arc::new(CountingHandler(count.clone())));

        bus.publish(envelope("booking.created.v1", "b1")).await.unwrap();
        bus.publish(envelope("booking.cancelled.v1", "b1")).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_count(), 2);
        assert_eq!(bus.events_of_type("booking.created.v1").len(), 1);
    }

    #[tokio::test]
    async fn subscribe_all_covers_several_types() {
        let bus = InMemoryEventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        bus.subscribe_all(
            &["booking.created.v1", "booking.cancelled.v1"],
            Arc::new(CountingHandler(count.clone())),
        );

        bus.publish(envelope("booking.created.v1", "b1")).await.unwrap();
        bus.publish(envelope("booking.cancelled.v1", "b1")).await.unwrap();
        bus.publish(envelope("unrelated.v1", "b1")).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn handler_failure_surfaces_with_handler_name() {
        struct FailingHandler;

        #[async_trait]
        impl EventHandler for FailingHandler {
            async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
                Err(DomainError::new(ErrorCode::InternalError, "boom"))
            }
            fn name(&self) -> &'static str {
                "FailingHandler"
            }
        }

        let bus = InMemoryEventBus::new();
        bus.subscribe("booking.created.v1", Arc::new(FailingHandler));
        let err = bus
            .publish(envelope("booking.created.v1", "b1"))
            .await
            .unwrap_err();
        assert!(err.message.contains("FailingHandler"));
    }

    #[tokio::test]
    async fn publish_batch_keeps_order() {
        let bus = InMemoryEventBus::new();
        bus.publish_batch(vec![
            envelope("a.v1", "1"),
            envelope("b.v1", "2"),
        ])
        .await
        .unwrap();
        let events = bus.published_events();
        assert_eq!(events[0].event_type, "a.v1");
        assert_eq!(events[1].event_type, "b.v1");
    }
}

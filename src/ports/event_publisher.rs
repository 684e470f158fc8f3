//! Event publishing port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events to the in-process bus.
///
/// Publishing is best-effort from the caller's perspective: handlers log a
/// publish failure and continue, since the state change has already been
/// persisted by the time the event goes out.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish a batch of events in order.
    async fn publish_batch(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

//! Queue directory port (read-only).

use async_trait::async_trait;

use crate::domain::catalog::Queue;
use crate::domain::foundation::{CommerceId, DomainError, QueueId};

/// Read-only access to queue definitions.
#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Find a queue by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &QueueId) -> Result<Option<Queue>, DomainError>;

    /// All queues belonging to a commerce.
    async fn find_by_commerce(&self, commerce_id: &CommerceId)
        -> Result<Vec<Queue>, DomainError>;
}

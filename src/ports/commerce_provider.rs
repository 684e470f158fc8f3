//! Commerce directory port (read-only).

use async_trait::async_trait;

use crate::domain::catalog::Commerce;
use crate::domain::foundation::{CommerceId, DomainError};

/// Read-only access to commerce records and their feature toggles.
#[async_trait]
pub trait CommerceProvider: Send + Sync {
    /// Find a commerce by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CommerceId) -> Result<Option<Commerce>, DomainError>;
}

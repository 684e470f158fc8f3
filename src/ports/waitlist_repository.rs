//! Waitlist repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DayDate, DomainError, QueueId, WaitlistEntryId};
use crate::domain::waitlist::WaitlistEntry;

/// Repository port for waitlist entries.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Save a new entry.
    async fn save(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    /// Update an existing entry.
    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    /// Find an entry by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &WaitlistEntryId)
        -> Result<Option<WaitlistEntry>, DomainError>;

    /// Pending, unprocessed, not-yet-linked entries for a queue-day,
    /// ordered by creation time ascending.
    async fn find_promotable(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<WaitlistEntry>, DomainError>;
}

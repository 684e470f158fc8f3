//! In-memory waitlist repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DayDate, DomainError, ErrorCode, QueueId, WaitlistEntryId};
use crate::domain::waitlist::WaitlistEntry;
use crate::ports::WaitlistRepository;

/// HashMap-backed [`WaitlistRepository`].
#[derive(Default)]
pub struct InMemoryWaitlistRepository {
    entries: Mutex<HashMap<WaitlistEntryId, WaitlistEntry>>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn save(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        map.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        if !map.contains_key(&entry.id) {
            return Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                format!("Waitlist entry {} not found", entry.id),
            ));
        }
        map.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &WaitlistEntryId,
    ) -> Result<Option<WaitlistEntry>, DomainError> {
        let map = self
            .entries
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn find_promotable(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<WaitlistEntry>, DomainError> {
        let map = self
            .entries
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        let mut promotable: Vec<WaitlistEntry> = map
            .values()
            .filter(|e| e.queue_id == *queue_id && e.date == *date && e.is_promotable())
            .cloned()
            .collect();
        promotable.sort_by_key(|e| e.created_at);
        Ok(promotable)
    }
}

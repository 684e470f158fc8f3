//! In-memory taken-block ledger.
//!
//! One mutex guards the whole map, so `reserve` checks and writes under a
//! single critical section and two overlapping reservations cannot both
//! succeed.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::booking::TakenBlockRecord;
use crate::domain::catalog::BlockSelection;
use crate::domain::foundation::{DayDate, DomainError, ErrorCode, QueueId, SessionKey};
use crate::ports::TakenBlockLedger;

type SlotKey = (QueueId, DayDate, u32);

/// Mutex-guarded [`TakenBlockLedger`].
#[derive(Default)]
pub struct InMemoryTakenBlockLedger {
    records: Mutex<HashMap<SlotKey, TakenBlockRecord>>,
}

impl InMemoryTakenBlockLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TakenBlockLedger for InMemoryTakenBlockLedger {
    async fn find_taken(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        excluding_session: Option<&SessionKey>,
    ) -> Result<Vec<TakenBlockRecord>, DomainError> {
        let map = self
            .records
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        let mut taken: Vec<TakenBlockRecord> = map
            .values()
            .filter(|r| r.queue_id == *queue_id && r.date == *date)
            .filter(|r| excluding_session.map_or(true, |s| r.session_id != *s))
            .cloned()
            .collect();
        taken.sort_by_key(|r| r.block_number);
        Ok(taken)
    }

    async fn reserve(&self, records: &[TakenBlockRecord]) -> Result<(), DomainError> {
        let mut map = self
            .records
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        for record in records {
            let key = (record.queue_id, record.date, record.block_number);
            if map.contains_key(&key) {
                return Err(DomainError::new(
                    ErrorCode::SlotTaken,
                    format!(
                        "Block {} of queue {} on {} is already taken",
                        record.block_number, record.queue_id, record.date
                    ),
                )
                .with_detail("block_number", record.block_number.to_string()));
            }
        }
        for record in records {
            let key = (record.queue_id, record.date, record.block_number);
            map.insert(key, record.clone());
        }
        Ok(())
    }

    async fn release(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        selection: &BlockSelection,
    ) -> Result<(), DomainError> {
        let mut map = self
            .records
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        let mut removed = 0usize;
        for number in selection.numbers() {
            if map.remove(&(*queue_id, *date, number)).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            debug!(%queue_id, %date, "No taken-block records matched the release");
        }
        Ok(())
    }
}

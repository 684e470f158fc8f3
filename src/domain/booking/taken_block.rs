//! Taken-block ledger records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::BlockSelection;
use crate::domain::foundation::{DayDate, QueueId, SessionKey};

/// Ledger row marking one block of one queue-day as held.
///
/// At most one record exists per (queue, date, block number); the ledger
/// adapter enforces the uniqueness on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenBlockRecord {
    pub id: Uuid,
    pub queue_id: QueueId,
    pub date: DayDate,
    pub block_number: u32,
    pub hour_from: String,
    pub hour_to: String,

    /// The request session that wrote the record; collision lookups exclude
    /// the caller's own in-flight session.
    pub session_id: SessionKey,
}

impl TakenBlockRecord {
    /// Expands a block selection into one ledger record per constituent.
    pub fn from_selection(
        queue_id: QueueId,
        date: DayDate,
        selection: &BlockSelection,
        session_id: SessionKey,
    ) -> Vec<Self> {
        selection
            .constituents()
            .into_iter()
            .map(|block| TakenBlockRecord {
                id: Uuid::new_v4(),
                queue_id,
                date,
                block_number: block.number,
                hour_from: block.hour_from.clone(),
                hour_to: block.hour_to.clone(),
                session_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Block;

    #[test]
    fn composite_selection_expands_to_one_record_per_block() {
        let selection = BlockSelection::composite(vec![
            Block::new(1, "09:00", "09:30"),
            Block::new(2, "09:30", "10:00"),
        ]);
        let session = SessionKey::new();
        let records = TakenBlockRecord::from_selection(
            QueueId::new(),
            DayDate::today(),
            &selection,
            session,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].block_number, 1);
        assert_eq!(records[1].block_number, 2);
        assert!(records.iter().all(|r| r.session_id == session));
    }
}

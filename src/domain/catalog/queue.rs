//! Queue read model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommerceId, QueueId};

use super::Block;

/// Bounded-capacity bookable resource exposing optional fixed time blocks.
///
/// Queues are owned by an external collaborator and are read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub commerce_id: CommerceId,
    pub name: String,

    /// Maximum number of non-cancelled bookings per calendar day.
    pub daily_limit: u32,

    /// Fixed daily schedule; empty for queues booked without blocks.
    pub blocks: Vec<Block>,

    /// Optional cap on how many blocks a single booking may span.
    pub block_limit: Option<u32>,
}

impl Queue {
    /// Looks up a configured block by its number.
    pub fn block(&self, number: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| b.number == number)
    }

    /// Returns true when the queue operates on a fixed block schedule.
    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_queue() -> Queue {
        Queue {
            id: QueueId::new(),
            commerce_id: CommerceId::new(),
            name: "General attention".to_string(),
            daily_limit: 10,
            blocks: vec![Block::new(1, "09:00", "09:30"), Block::new(2, "09:30", "10:00")],
            block_limit: Some(2),
        }
    }

    #[test]
    fn block_lookup_finds_by_number() {
        let queue = test_queue();
        assert_eq!(queue.block(2).unwrap().hour_from, "09:30");
        assert!(queue.block(9).is_none());
    }

    #[test]
    fn has_blocks_reflects_schedule() {
        let mut queue = test_queue();
        assert!(queue.has_blocks());
        queue.blocks.clear();
        assert!(!queue.has_blocks());
    }
}

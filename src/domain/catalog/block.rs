//! Time blocks within a queue's day.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed time-window slot within a queue's day.
///
/// Block identity within a (queue, date) is the `number`; `hour_from` /
/// `hour_to` are display data carried along for notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position of this block in the queue's daily schedule (1-based).
    pub number: u32,

    /// Start of the window, "HH:MM".
    pub hour_from: String,

    /// End of the window, "HH:MM".
    pub hour_to: String,
}

impl Block {
    pub fn new(number: u32, hour_from: impl Into<String>, hour_to: impl Into<String>) -> Self {
        Self {
            number,
            hour_from: hour_from.into(),
            hour_to: hour_to.into(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}-{}", self.number, self.hour_from, self.hour_to)
    }
}

/// The block(s) a booking occupies.
///
/// Longer services span several consecutive blocks; a composite selection
/// holds and releases every constituent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockSelection {
    Single { block: Block },
    Composite { blocks: Vec<Block> },
}

impl BlockSelection {
    pub fn single(block: Block) -> Self {
        BlockSelection::Single { block }
    }

    pub fn composite(blocks: Vec<Block>) -> Self {
        BlockSelection::Composite { blocks }
    }

    /// Returns every block this selection occupies.
    pub fn constituents(&self) -> Vec<&Block> {
        match self {
            BlockSelection::Single { block } => vec![block],
            BlockSelection::Composite { blocks } => blocks.iter().collect(),
        }
    }

    /// Returns the block numbers this selection occupies.
    pub fn numbers(&self) -> Vec<u32> {
        self.constituents().iter().map(|b| b.number).collect()
    }

    /// Checks whether this selection collides with a held block number.
    pub fn occupies(&self, number: u32) -> bool {
        self.constituents().iter().any(|b| b.number == number)
    }

    /// The hour span covered by the selection, for display.
    pub fn span(&self) -> (String, String) {
        let blocks = self.constituents();
        let from = blocks
            .first()
            .map(|b| b.hour_from.clone())
            .unwrap_or_default();
        let to = blocks.last().map(|b| b.hour_to.clone()).unwrap_or_default();
        (from, to)
    }
}

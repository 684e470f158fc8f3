//! Taken-block ledger port: collision-detection source of truth.

use async_trait::async_trait;

use crate::domain::booking::TakenBlockRecord;
use crate::domain::catalog::BlockSelection;
use crate::domain::foundation::{DayDate, DomainError, QueueId, SessionKey};

/// Ledger of which (queue, date, block) triples are currently held.
///
/// Implementations must ensure:
/// - At most one record per (queue, date, block number)
/// - `reserve` is atomic and all-or-nothing across the given records: two
///   concurrent reservations of an overlapping selection cannot both succeed
#[async_trait]
pub trait TakenBlockLedger: Send + Sync {
    /// Records currently held for a queue-day, excluding the caller's own
    /// in-flight session when given.
    async fn find_taken(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        excluding_session: Option<&SessionKey>,
    ) -> Result<Vec<TakenBlockRecord>, DomainError>;

    /// Atomically inserts every record, failing with `SlotTaken` (and
    /// writing nothing) if any (queue, date, block number) is already held.
    async fn reserve(&self, records: &[TakenBlockRecord]) -> Result<(), DomainError>;

    /// Deletes the records matching the selection's constituents. A no-op
    /// (logged at debug) when nothing matches.
    async fn release(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        selection: &BlockSelection,
    ) -> Result<(), DomainError>;
}

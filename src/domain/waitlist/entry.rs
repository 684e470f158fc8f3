//! Waitlist entry aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::UserSnapshot;
use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DayDate, DomainError, ErrorCode, QueueId, StateMachine,
    Timestamp, WaitlistEntryId,
};

use super::WaitlistStatus;

/// Standing request to be notified when a (queue, date) slot frees up.
///
/// # Invariants
///
/// - Promoted at most once: once `processed` or `booking_id` is set, no
///   further notification may fire and no second booking may claim it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: WaitlistEntryId,
    pub queue_id: QueueId,
    pub commerce_id: CommerceId,
    pub date: DayDate,
    pub channel: String,
    pub user: UserSnapshot,
    pub client_id: Option<ClientId>,
    pub status: WaitlistStatus,
    pub processed: bool,

    /// Set once the entry was claimed into a booking.
    pub booking_id: Option<BookingId>,

    pub created_at: Timestamp,
}

impl WaitlistEntry {
    /// Builds a fresh pending entry.
    pub fn new(
        queue_id: QueueId,
        commerce_id: CommerceId,
        date: DayDate,
        channel: impl Into<String>,
        user: UserSnapshot,
        client_id: Option<ClientId>,
    ) -> Self {
        Self {
            id: WaitlistEntryId::new(),
            queue_id,
            commerce_id,
            date,
            channel: channel.into(),
            user,
            client_id,
            status: WaitlistStatus::Pending,
            processed: false,
            booking_id: None,
            created_at: Timestamp::now(),
        }
    }

    /// True while the entry may still be notified or claimed.
    pub fn is_promotable(&self) -> bool {
        self.status == WaitlistStatus::Pending && !self.processed && self.booking_id.is_none()
    }

    /// Marks the entry as promoted into the given booking. Terminal.
    pub fn promote(&mut self, booking_id: BookingId) -> Result<(), DomainError> {
        if !self.is_promotable() {
            return Err(DomainError::new(
                ErrorCode::AlreadyProcessed,
                format!("Waitlist entry {} was already promoted", self.id),
            )
            .with_detail("entry_id", self.id.to_string()));
        }
        self.status = self
            .status
            .transition_to(WaitlistStatus::Processed)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.processed = true;
        self.booking_id = Some(booking_id);
        Ok(())
    }

    /// Withdraws a pending entry.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(WaitlistStatus::Cancelled)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_entry() -> WaitlistEntry {
        WaitlistEntry::new(
            QueueId::new(),
            CommerceId::new(),
            DayDate::today(),
            "web",
            UserSnapshot::new("Ana"),
            None,
        )
    }

    #[test]
    fn new_entry_is_promotable() {
        assert!(test_entry().is_promotable());
    }

    #[test]
    fn promote_sets_terminal_state_and_booking() {
        let mut entry = test_entry();
        let booking_id = BookingId::new();
        entry.promote(booking_id).unwrap();
        assert_eq!(entry.status, WaitlistStatus::Processed);
        assert!(entry.processed);
        assert_eq!(entry.booking_id, Some(booking_id));
        assert!(!entry.is_promotable());
    }

    #[test]
    fn promote_twice_fails() {
        let mut entry = test_entry();
        entry.promote(BookingId::new()).unwrap();
        let err = entry.promote(BookingId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyProcessed);
    }

    #[test]
    fn cancelled_entry_cannot_be_promoted() {
        let mut entry = test_entry();
        entry.cancel().unwrap();
        assert!(!entry.is_promotable());
        assert!(entry.promote(BookingId::new()).is_err());
    }
}

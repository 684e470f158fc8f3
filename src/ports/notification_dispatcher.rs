//! Outbound notification port.
//!
//! Dispatch is fire-and-forget from the caller's point of view: handlers
//! spawn the send and never fail the originating operation on a delivery
//! error. Implementations log failures and return them for callers that do
//! want to inspect the outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::UserSnapshot;
use crate::domain::foundation::{
    BookingId, CommerceId, DayDate, DomainError, QueueId, WaitlistEntryId,
};

/// Payload for booking lifecycle notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingNotification {
    pub booking_id: BookingId,
    pub commerce_id: CommerceId,
    pub queue_id: QueueId,
    pub queue_name: String,
    pub date: DayDate,
    pub number: u32,
    pub channel: String,
    pub user: UserSnapshot,
}

/// Payload telling a waitlisted client a slot opened up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistSlotOpen {
    pub entry_id: WaitlistEntryId,
    pub commerce_id: CommerceId,
    pub queue_id: QueueId,
    pub date: DayDate,
    pub user: UserSnapshot,
    /// Link the client follows to claim the freed slot.
    pub claim_url: String,
}

/// Port for user-facing notifications (mail, push, messaging).
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_booking_created(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError>;

    async fn send_booking_cancelled(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError>;

    /// Upcoming-booking reminder.
    async fn send_booking_reminder(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError>;

    async fn send_waitlist_slot_open(
        &self,
        notification: &WaitlistSlotOpen,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_dispatcher_is_object_safe() {
        fn _accepts_dyn(_dispatcher: &dyn NotificationDispatcher) {}
    }
}

//! Logging notification dispatcher.
//!
//! Used for local runs and tests: every send becomes a structured log line
//! and always succeeds.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::DomainError;
use crate::ports::{BookingNotification, NotificationDispatcher, WaitlistSlotOpen};

/// [`NotificationDispatcher`] that only logs.
#[derive(Default)]
pub struct LoggingNotificationDispatcher;

impl LoggingNotificationDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn send_booking_created(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        info!(
            booking_id = %notification.booking_id,
            queue = %notification.queue_name,
            date = %notification.date,
            number = notification.number,
            "Booking created notification"
        );
        Ok(())
    }

    async fn send_booking_cancelled(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        info!(
            booking_id = %notification.booking_id,
            queue = %notification.queue_name,
            date = %notification.date,
            "Booking cancelled notification"
        );
        Ok(())
    }

    async fn send_booking_reminder(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        info!(
            booking_id = %notification.booking_id,
            date = %notification.date,
            "Booking reminder notification"
        );
        Ok(())
    }

    async fn send_waitlist_slot_open(
        &self,
        notification: &WaitlistSlotOpen,
    ) -> Result<(), DomainError> {
        info!(
            entry_id = %notification.entry_id,
            date = %notification.date,
            claim_url = %notification.claim_url,
            "Waitlist slot-open notification"
        );
        Ok(())
    }
}

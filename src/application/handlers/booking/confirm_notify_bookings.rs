//! ConfirmNotifyBookingsHandler - reminder sweep for upcoming bookings.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::BookingError;
use crate::ports::{
    BookingNotification, BookingRepository, NotificationDispatcher, QueueProvider,
};

/// Command to send reminders for bookings inside the horizon.
#[derive(Debug, Clone)]
pub struct ConfirmNotifyBookingsCommand {
    /// How many days ahead the reminder window reaches.
    pub days_before: u32,
}

/// Outcome of one reminder sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    pub sent: u32,
    pub failed: u32,
}

/// Batch handler sending at most one reminder per booking.
///
/// A booking is marked `confirm_notified` only after a successful send, so
/// failed deliveries are retried by the next sweep and successful ones are
/// never repeated.
pub struct ConfirmNotifyBookingsHandler {
    booking_repository: Arc<dyn BookingRepository>,
    queue_provider: Arc<dyn QueueProvider>,
    notifications: Arc<dyn NotificationDispatcher>,
}

impl ConfirmNotifyBookingsHandler {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        queue_provider: Arc<dyn QueueProvider>,
        notifications: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            booking_repository,
            queue_provider,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmNotifyBookingsCommand,
    ) -> Result<ReminderSummary, BookingError> {
        let due = self
            .booking_repository
            .find_unreminded_upcoming(cmd.days_before)
            .await?;

        let mut summary = ReminderSummary::default();
        for mut booking in due {
            let queue_name = match self.queue_provider.find_by_id(&booking.queue_id).await {
                Ok(Some(queue)) => queue.name,
                _ => String::new(),
            };
            let notification = BookingNotification {
                booking_id: booking.id,
                commerce_id: booking.commerce_id,
                queue_id: booking.queue_id,
                queue_name,
                date: booking.date,
                number: booking.number,
                channel: booking.channel.clone(),
                user: booking.user.clone(),
            };

            match self.notifications.send_booking_reminder(&notification).await {
                Ok(()) => {
                    booking.mark_reminded();
                    if let Err(e) = self.booking_repository.update(&booking).await {
                        warn!(booking_id = %booking.id, error = %e, "Reminder flag update failed");
                        summary.failed += 1;
                    } else {
                        summary.sent += 1;
                    }
                }
                Err(e) => {
                    warn!(booking_id = %booking.id, error = %e, "Reminder send failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            days_before = cmd.days_before,
            sent = summary.sent,
            failed = summary.failed,
            "Reminder sweep finished"
        );
        Ok(summary)
    }
}

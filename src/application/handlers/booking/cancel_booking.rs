//! CancelBookingHandler - cancels a booking, frees its blocks, and offers
//! the slot to the waitlist.

use std::sync::Arc;

use tracing::warn;

use crate::application::handlers::waitlist::PromoteWaitlistHandler;
use crate::domain::booking::{Booking, BookingCancelled, BookingError};
use crate::domain::foundation::{
    BookingId, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{
    BookingNotification, BookingRepository, EventPublisher, NotificationDispatcher,
    QueueProvider, TakenBlockLedger,
};

/// Command to cancel a booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
    pub acting_user: UserId,
}

/// Handler for booking cancellation.
pub struct CancelBookingHandler {
    booking_repository: Arc<dyn BookingRepository>,
    ledger: Arc<dyn TakenBlockLedger>,
    queue_provider: Arc<dyn QueueProvider>,
    notifications: Arc<dyn NotificationDispatcher>,
    event_publisher: Arc<dyn EventPublisher>,
    promoter: Arc<PromoteWaitlistHandler>,
}

impl CancelBookingHandler {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        ledger: Arc<dyn TakenBlockLedger>,
        queue_provider: Arc<dyn QueueProvider>,
        notifications: Arc<dyn NotificationDispatcher>,
        event_publisher: Arc<dyn EventPublisher>,
        promoter: Arc<PromoteWaitlistHandler>,
    ) -> Self {
        Self {
            booking_repository,
            ledger,
            queue_provider,
            notifications,
            event_publisher,
            promoter,
        }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .booking_repository
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        booking.cancel()?;

        // Free the blocks before persisting: if the release fails the
        // booking stays active and the ledger stays consistent.
        if let Some(selection) = &booking.block {
            self.ledger
                .release(&booking.queue_id, &booking.date, selection)
                .await?;
        }

        self.booking_repository.update(&booking).await?;

        self.fan_out(&booking, &cmd.acting_user).await;

        Ok(booking)
    }

    /// Side-channel fan-out: cancellation notification, domain event, and
    /// the waitlist sweep. Failures are logged, the cancellation stands.
    async fn fan_out(&self, booking: &Booking, acting_user: &UserId) {
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
        if let Err(e) = self.notifications.send_booking_cancelled(&notification).await {
            warn!(booking_id = %booking.id, error = %e, "Cancellation notification failed");
        }

        let event = BookingCancelled {
            event_id: EventId::new(),
            booking_id: booking.id,
            queue_id: booking.queue_id,
            date: booking.date,
            acting_user_id: acting_user.to_string(),
            occurred_at: Timestamp::now(),
        };
        let envelope = event.to_envelope().with_user(acting_user.to_string());
        if let Err(e) = self.event_publisher.publish(envelope).await {
            warn!(booking_id = %booking.id, error = %e, "Cancellation event publish failed");
        }

        if let Err(e) = self.promoter.notify_for_cancelled_booking(booking).await {
            warn!(booking_id = %booking.id, error = %e, "Waitlist promotion sweep failed");
        }
    }
}

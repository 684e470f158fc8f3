//! GetBookingDetailsHandler - booking detail view with queue position.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::{BookingRepository, CommerceProvider, QueueProvider};

/// Query for one booking's details.
#[derive(Debug, Clone)]
pub struct GetBookingDetailsQuery {
    pub booking_id: BookingId,
}

/// Booking enriched with its surroundings.
#[derive(Debug, Clone)]
pub struct BookingDetailsView {
    pub booking: Booking,
    pub queue_name: String,
    pub commerce_name: String,

    /// Earlier-numbered, still-active bookings on the same queue-day.
    pub bookings_ahead: u32,
}

/// Query handler for booking details.
pub struct GetBookingDetailsHandler {
    booking_repository: Arc<dyn BookingRepository>,
    queue_provider: Arc<dyn QueueProvider>,
    commerce_provider: Arc<dyn CommerceProvider>,
}

impl GetBookingDetailsHandler {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        queue_provider: Arc<dyn QueueProvider>,
        commerce_provider: Arc<dyn CommerceProvider>,
    ) -> Self {
        Self {
            booking_repository,
            queue_provider,
            commerce_provider,
        }
    }

    pub async fn handle(
        &self,
        query: GetBookingDetailsQuery,
    ) -> Result<BookingDetailsView, BookingError> {
        let booking = self
            .booking_repository
            .find_by_id(&query.booking_id)
            .await?
            .ok_or(BookingError::NotFound(query.booking_id))?;

        let queue_name = self
            .queue_provider
            .find_by_id(&booking.queue_id)
            .await?
            .map(|q| q.name)
            .unwrap_or_default();
        let commerce_name = self
            .commerce_provider
            .find_by_id(&booking.commerce_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default();

        let day_bookings = self
            .booking_repository
            .find_by_queue_and_date(&booking.queue_id, &booking.date)
            .await?;
        let bookings_ahead = day_bookings
            .iter()
            .filter(|b| b.number < booking.number && b.is_active())
            .count() as u32;

        Ok(BookingDetailsView {
            booking,
            queue_name,
            commerce_name,
            bookings_ahead,
        })
    }
}

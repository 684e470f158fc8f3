//! ListBookingsHandler - side-effect-free booking listings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{DayDate, QueueId};
use crate::ports::BookingRepository;

/// Query for a queue-day listing.
#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub queue_id: QueueId,
    pub date: DayDate,
}

/// Query for pending bookings inside an inclusive date range.
#[derive(Debug, Clone)]
pub struct ListPendingBookingsQuery {
    pub from: DayDate,
    pub to: DayDate,
}

/// Query handler for booking listings.
pub struct ListBookingsHandler {
    booking_repository: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(booking_repository: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repository }
    }

    /// Every booking for the queue-day, cancelled included, in number order.
    pub async fn by_queue_and_date(
        &self,
        query: ListBookingsQuery,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self
            .booking_repository
            .find_by_queue_and_date(&query.queue_id, &query.date)
            .await?)
    }

    /// Pending bookings across queues whose date falls inside the range.
    pub async fn pending_between(
        &self,
        query: ListPendingBookingsQuery,
    ) -> Result<Vec<Booking>, BookingError> {
        if query.from > query.to {
            return Err(BookingError::validation(
                "from",
                "Range start must not be after range end",
            ));
        }
        Ok(self
            .booking_repository
            .find_pending_between(&query.from, &query.to)
            .await?)
    }
}

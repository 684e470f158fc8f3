//! Booking repository port (write side + day-scoped queries).

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DayDate, DomainError, QueueId};

/// Repository port for Booking aggregate persistence.
///
/// Implementations must ensure:
/// - Bookings are never hard-deleted; cancellation is a status change
/// - `next_number_for_day` yields a per-(queue, date) sequence
/// - Secondary lookup by (queue_id, date) is efficient
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking.
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Update an existing booking (last-write-wins at record level).
    async fn update(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Find a booking by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// All bookings for a queue-day, cancelled included, ordered by number.
    async fn find_by_queue_and_date(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Count of non-cancelled bookings for a queue-day (capacity check).
    async fn count_active_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError>;

    /// Next per-day sequence number for a queue-day (1-based).
    async fn next_number_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError>;

    /// Pending bookings whose date falls inside the inclusive range.
    async fn find_pending_between(
        &self,
        from: &DayDate,
        to: &DayDate,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Active bookings within the next `days_before` days that have not yet
    /// received a reminder (`confirm_notified == false`).
    async fn find_unreminded_upcoming(
        &self,
        days_before: u32,
    ) -> Result<Vec<Booking>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BookingRepository) {}
    }
}

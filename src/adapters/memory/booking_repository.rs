//! In-memory booking repository.
//!
//! Backs the integration tests and local runs without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, DayDate, DomainError, ErrorCode, QueueId, Timestamp,
};
use crate::ports::BookingRepository;

/// HashMap-backed [`BookingRepository`].
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn all(&self) -> Vec<Booking> {
        self.bookings
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut map = self
            .bookings
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        map.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut map = self
            .bookings
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        if !map.contains_key(&booking.id) {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking {} not found", booking.id),
            ));
        }
        map.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let map = self
            .bookings
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn find_by_queue_and_date(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut bookings: Vec<Booking> = self
            .all()
            .into_iter()
            .filter(|b| b.queue_id == *queue_id && b.date == *date)
            .collect();
        bookings.sort_by_key(|b| b.number);
        Ok(bookings)
    }

    async fn count_active_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError> {
        let count = self
            .all()
            .into_iter()
            .filter(|b| b.queue_id == *queue_id && b.date == *date && !b.cancelled)
            .count();
        Ok(count as u32)
    }

    async fn next_number_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError> {
        let max = self
            .all()
            .into_iter()
            .filter(|b| b.queue_id == *queue_id && b.date == *date)
            .map(|b| b.number)
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }

    async fn find_pending_between(
        &self,
        from: &DayDate,
        to: &DayDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut bookings: Vec<Booking> = self
            .all()
            .into_iter()
            .filter(|b| {
                b.status == BookingStatus::Pending && b.date >= *from && b.date <= *to
            })
            .collect();
        bookings.sort_by(|a, b| a.date.cmp(&b.date).then(a.number.cmp(&b.number)));
        Ok(bookings)
    }

    async fn find_unreminded_upcoming(
        &self,
        days_before: u32,
    ) -> Result<Vec<Booking>, DomainError> {
        let today = Timestamp::now().day();
        let horizon = today.add_days(days_before as i64);
        Ok(self
            .all()
            .into_iter()
            .filter(|b| {
                b.is_active() && !b.confirm_notified && b.date >= today && b.date <= horizon
            })
            .collect())
    }
}

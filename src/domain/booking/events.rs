//! Booking domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, DayDate, EventId, QueueId, Timestamp};
use crate::domain_event;

/// A booking was created and holds its slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub queue_id: QueueId,
    pub date: DayDate,
    pub number: u32,
    /// Acting user (the requester, or the operator booking on their behalf).
    pub acting_user_id: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    BookingCreated,
    event_type = "booking.created.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A booking was cancelled and its blocks released.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelled {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub queue_id: QueueId,
    pub date: DayDate,
    pub acting_user_id: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    BookingCancelled,
    event_type = "booking.cancelled.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = occurred_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn created_event_envelope_has_type_and_aggregate() {
        let event = BookingCreated {
            event_id: EventId::new(),
            booking_id: BookingId::new(),
            queue_id: QueueId::new(),
            date: DayDate::today(),
            number: 4,
            acting_user_id: "user-1".to_string(),
            occurred_at: Timestamp::now(),
        };
        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "booking.created.v1");
        assert_eq!(envelope.aggregate_type, "Booking");
        assert_eq!(envelope.aggregate_id, event.booking_id.to_string());
        assert_eq!(envelope.payload["number"], 4);
    }
}

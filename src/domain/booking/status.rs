//! Booking status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Booking lifecycle status.
///
/// Transitions are finite and directional; a cancelled booking is never
/// resurrected. `Expired` is reachable only through batch reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation (commerce runs the booking-confirm flow, or the
    /// caller asked for it explicitly).
    Pending,

    /// Confirmed reservation holding its slot.
    Confirmed,

    /// The client attended; day closed for this booking.
    Attended,

    /// Cancelled by the client or the commerce. Terminal.
    ReserveCancelled,

    /// Closed out unconfirmed by batch reconciliation. Terminal.
    Expired,
}

impl BookingStatus {
    /// Returns true while the booking still holds its slot and counts
    /// against queue capacity.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Confirmed)
                | (Pending, ReserveCancelled)
                | (Pending, Expired)
            // From CONFIRMED
                | (Confirmed, Attended)
                | (Confirmed, ReserveCancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Confirmed, ReserveCancelled, Expired],
            Confirmed => vec![Attended, ReserveCancelled],
            Attended => vec![],
            ReserveCancelled => vec![],
            Expired => vec![],
        }
    }
}

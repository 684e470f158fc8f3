//! Booking aggregate entity.
//!
//! A Booking is a reservation of one (queue, date) position, optionally
//! holding one or more time blocks. Bookings are created by the factory,
//! mutated only through the methods here, and never hard-deleted.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{BlockSelection, ServiceDetail, UserSnapshot};
use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DayDate, DomainError, ErrorCode, PackageId, QueueId,
    ServiceId, SessionKey, StateMachine, Timestamp,
};

use super::{BookingKind, BookingStatus};

/// Reservation aggregate.
///
/// # Invariants
///
/// - `number` is a per-(queue, date) sequence assigned at creation.
/// - Status transitions follow [`BookingStatus`]; cancelled bookings are
///   never resurrected.
/// - A block-bearing booking has matching taken-block ledger records while
///   its status is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub queue_id: QueueId,
    pub commerce_id: CommerceId,

    /// Calendar day the reservation is for.
    pub date: DayDate,

    /// Position in the day's sequence for this queue.
    pub number: u32,

    pub status: BookingStatus,

    /// Where the booking came from ("web", "qr", "waitlist", ...).
    pub channel: String,

    /// Contact snapshot captured at creation.
    pub user: UserSnapshot,

    /// Identified client, when the booking was made for a known client.
    pub client_id: Option<ClientId>,

    /// Held blocks, when the queue runs a fixed schedule.
    pub block: Option<BlockSelection>,

    pub services_id: Vec<ServiceId>,
    pub services_details: Vec<ServiceDetail>,

    /// Session package this booking belongs to, linked after creation.
    pub package_id: Option<PackageId>,

    pub kind: BookingKind,

    /// Ledger session that holds this booking's blocks.
    pub session_id: SessionKey,

    pub cancelled: bool,
    pub cancelled_at: Option<Timestamp>,

    /// Batch-reconciliation bookkeeping.
    pub processed: bool,
    pub processed_at: Option<Timestamp>,

    /// Whether the upcoming-booking reminder has been sent.
    pub confirm_notified: bool,

    pub created_at: Timestamp,
}

impl Booking {
    fn transition(&mut self, target: BookingStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("booking_id", self.id.to_string())
        })?;
        Ok(())
    }

    /// Cancels this booking. Terminal; the held blocks must be released by
    /// the caller after persistence.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition(BookingStatus::ReserveCancelled)?;
        self.cancelled = true;
        self.cancelled_at = Some(Timestamp::now());
        Ok(())
    }

    /// Confirms a pending booking.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.transition(BookingStatus::Confirmed)
    }

    /// Marks a confirmed booking attended.
    pub fn attend(&mut self) -> Result<(), DomainError> {
        self.transition(BookingStatus::Attended)
    }

    /// Closes out an unconfirmed booking during batch reconciliation.
    pub fn expire(&mut self) -> Result<(), DomainError> {
        self.transition(BookingStatus::Expired)
    }

    /// Records that batch reconciliation handled this booking.
    pub fn mark_processed(&mut self) {
        self.processed = true;
        self.processed_at = Some(Timestamp::now());
    }

    /// Records that the reminder notification went out.
    pub fn mark_reminded(&mut self) {
        self.confirm_notified = true;
    }

    /// Attaches the session package after linkage.
    pub fn attach_package(&mut self, package_id: PackageId) {
        self.package_id = Some(package_id);
    }

    /// Returns true while this booking counts against capacity and holds
    /// its blocks.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

//! Session package read model.
//!
//! Packages are owned by the external session tracker (see
//! `ports::PackageTracker`); this core reads them to pick linkage targets
//! and never decrements counters itself.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, PackageId, ServiceId, Timestamp,
};

/// Package lifecycle status, as reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Requested,
    Active,
    Confirmed,
    Completed,
    Cancelled,
}

impl PackageStatus {
    /// Statuses under which a package may still absorb bookings.
    pub fn accepts_bookings(&self) -> bool {
        matches!(
            self,
            PackageStatus::Active | PackageStatus::Confirmed | PackageStatus::Requested
        )
    }
}

/// Multi-session service bundle for one (commerce, client, service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub commerce_id: CommerceId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub name: String,

    /// Total sessions purchased.
    pub procedures_total: u32,

    /// Sessions not yet consumed. Never negative; decremented only by the
    /// tracker through an authorized link operation.
    pub procedures_left: u32,

    pub booking_ids: Vec<BookingId>,
    pub status: PackageStatus,
    pub created_at: Timestamp,
}

impl Package {
    /// True when this package may take another booking.
    pub fn is_open(&self) -> bool {
        self.status.accepts_bookings() && self.procedures_left > 0
    }
}

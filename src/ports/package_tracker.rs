//! Package tracker port (consumed boundary).
//!
//! The tracker is the authoritative bookkeeper for multi-session purchases:
//! it owns `procedures_left` and the booking associations. This core only
//! asks it to link or create; it never decrements counters itself.

use async_trait::async_trait;

use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DomainError, PackageId, ServiceId, UserId,
};
use crate::domain::package::{Package, PackageStatus};

/// Request to open a new package seeded with its first booking.
#[derive(Debug, Clone)]
pub struct NewPackage {
    pub commerce_id: CommerceId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub name: String,
    pub procedures_amount: u32,
    pub first_booking_id: BookingId,
    pub status: PackageStatus,
}

/// Port to the external session-package tracker.
#[async_trait]
pub trait PackageTracker: Send + Sync {
    /// Packages for a (commerce, client, service) triple, ordered by
    /// creation time ascending so "first eligible" is deterministic.
    async fn packages_for(
        &self,
        commerce_id: &CommerceId,
        client_id: &ClientId,
        service_id: &ServiceId,
    ) -> Result<Vec<Package>, DomainError>;

    /// Attaches/detaches bookings on an existing package; the tracker
    /// decrements `procedures_left` for each attached booking.
    async fn add_booking_to_package(
        &self,
        actor: &UserId,
        package_id: &PackageId,
        add: &[BookingId],
        remove: &[BookingId],
    ) -> Result<Package, DomainError>;

    /// Creates a package; the first booking counts as session 1.
    async fn create_package(
        &self,
        actor: &UserId,
        request: NewPackage,
    ) -> Result<Package, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_tracker_is_object_safe() {
        fn _accepts_dyn(_tracker: &dyn PackageTracker) {}
    }
}

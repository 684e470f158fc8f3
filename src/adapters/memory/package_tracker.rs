//! In-memory package tracker.
//!
//! Stands in for the external session tracker during tests and local runs,
//! honoring the same counter rules: a linked booking consumes one session,
//! counters never go negative.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DomainError, ErrorCode, PackageId, ServiceId, Timestamp,
    UserId,
};
use crate::domain::package::Package;
use crate::ports::{NewPackage, PackageTracker};

/// Vec-backed [`PackageTracker`].
#[derive(Default)]
pub struct InMemoryPackageTracker {
    packages: Mutex<Vec<Package>>,
}

impl InMemoryPackageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing package, for tests.
    pub fn insert(&self, package: Package) {
        if let Ok(mut packages) = self.packages.lock() {
            packages.push(package);
        }
    }
}

#[async_trait]
impl PackageTracker for InMemoryPackageTracker {
    async fn packages_for(
        &self,
        commerce_id: &CommerceId,
        client_id: &ClientId,
        service_id: &ServiceId,
    ) -> Result<Vec<Package>, DomainError> {
        let packages = self
            .packages
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        let mut matching: Vec<Package> = packages
            .iter()
            .filter(|p| {
                p.commerce_id == *commerce_id
                    && p.client_id == *client_id
                    && p.service_id == *service_id
            })
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.created_at);
        Ok(matching)
    }

    async fn add_booking_to_package(
        &self,
        _actor: &UserId,
        package_id: &PackageId,
        add: &[BookingId],
        remove: &[BookingId],
    ) -> Result<Package, DomainError> {
        let mut packages = self
            .packages
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        let package = packages
            .iter_mut()
            .find(|p| p.id == *package_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::PackageNotFound,
                    format!("Package {} not found", package_id),
                )
            })?;

        if (package.procedures_left as usize) < add.len() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Package {} has no sessions left", package_id),
            ));
        }

        package.booking_ids.retain(|id| !remove.contains(id));
        for booking_id in add {
            package.booking_ids.push(*booking_id);
            package.procedures_left -= 1;
        }
        Ok(package.clone())
    }

    async fn create_package(
        &self,
        _actor: &UserId,
        request: NewPackage,
    ) -> Result<Package, DomainError> {
        if request.procedures_amount == 0 {
            return Err(DomainError::validation(
                "procedures_amount",
                "A package must hold at least one session",
            ));
        }
        let package = Package {
            id: PackageId::new(),
            commerce_id: request.commerce_id,
            client_id: request.client_id,
            service_id: request.service_id,
            name: request.name,
            procedures_total: request.procedures_amount,
            // The seeding booking is session 1.
            procedures_left: request.procedures_amount - 1,
            booking_ids: vec![request.first_booking_id],
            status: request.status,
            created_at: Timestamp::now(),
        };
        let mut packages = self
            .packages
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        packages.push(package.clone());
        Ok(package)
    }
}

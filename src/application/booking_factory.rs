//! BookingFactory - assembles, validates, persists, and package-links a
//! booking.
//!
//! The creation handler resolves collaborators (queue, commerce, capacity,
//! slot reservation) and hands the factory a draft; the factory owns status
//! defaulting, telemedicine validation, the flat-document check, persistence,
//! and session-package linkage.

use std::sync::Arc;

use tracing::warn;

use crate::domain::booking::{Booking, BookingKind, BookingStatus, TelemedicineRequest};
use crate::domain::catalog::{
    BlockSelection, Commerce, Queue, ServiceDetail, UserSnapshot, FEATURE_BOOKING_CONFIRM,
};
use crate::domain::foundation::{
    ensure_flat, BookingId, ClientId, DayDate, DomainError, PackageId, ServiceId, SessionKey,
    Timestamp, UserId,
};
use crate::domain::package::{Package, PackageStatus};
use crate::ports::{BookingRepository, NewPackage, PackageTracker, ServiceProvider};

/// Everything the factory needs to assemble one booking. The caller has
/// already resolved the queue and commerce and reserved the blocks.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub queue: Queue,
    pub commerce: Commerce,
    pub date: DayDate,
    pub number: u32,
    pub channel: String,
    pub user: UserSnapshot,
    pub client_id: Option<ClientId>,
    pub block: Option<BlockSelection>,

    /// Caller-chosen status; when absent the commerce feature set decides.
    pub explicit_status: Option<BookingStatus>,

    pub services_id: Vec<ServiceId>,
    pub services_details: Vec<ServiceDetail>,
    pub telemedicine: Option<TelemedicineRequest>,
    pub session_id: SessionKey,
    pub acting_user: UserId,
}

/// Builds bookings out of validated drafts.
pub struct BookingFactory {
    booking_repository: Arc<dyn BookingRepository>,
    service_provider: Arc<dyn ServiceProvider>,
    package_tracker: Arc<dyn PackageTracker>,
}

impl BookingFactory {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        service_provider: Arc<dyn ServiceProvider>,
        package_tracker: Arc<dyn PackageTracker>,
    ) -> Self {
        Self {
            booking_repository,
            service_provider,
            package_tracker,
        }
    }

    /// Creates and persists a booking, then attempts package linkage.
    ///
    /// The booking is persisted before linkage; a tracker failure leaves the
    /// booking standing without a package id.
    pub async fn create(&self, draft: BookingDraft) -> Result<Booking, DomainError> {
        let status = match draft.explicit_status {
            Some(status) => status,
            None => default_status(&draft.commerce),
        };

        let now = Timestamp::now();
        let kind = match &draft.telemedicine {
            Some(request) => BookingKind::telemedicine(
                request,
                now,
                draft.commerce.telemedicine_recording_enabled,
            )?,
            None => BookingKind::Standard,
        };

        ensure_flat("block", &draft.block)?;
        ensure_flat("services_details", &draft.services_details)?;

        let mut booking = Booking {
            id: BookingId::new(),
            queue_id: draft.queue.id,
            commerce_id: draft.commerce.id,
            date: draft.date,
            number: draft.number,
            status,
            channel: draft.channel,
            user: draft.user,
            client_id: draft.client_id,
            block: draft.block,
            services_id: draft.services_id.clone(),
            services_details: draft.services_details.clone(),
            package_id: None,
            kind,
            session_id: draft.session_id,
            cancelled: false,
            cancelled_at: None,
            processed: false,
            processed_at: None,
            confirm_notified: false,
            created_at: now,
        };

        self.booking_repository.save(&booking).await?;

        if let Some(package_id) = self
            .link_package(&booking, &draft.services_details, &draft.acting_user)
            .await
        {
            booking.attach_package(package_id);
            self.booking_repository.update(&booking).await?;
        }

        Ok(booking)
    }

    /// Attaches the booking to a multi-session package when eligible:
    /// exactly one service, a known client, and a session count above one.
    /// Returns the linked package id, or `None` when no linkage applies or
    /// the tracker is unavailable.
    async fn link_package(
        &self,
        booking: &Booking,
        details: &[ServiceDetail],
        actor: &UserId,
    ) -> Option<PackageId> {
        let (service_id, client_id) = match (booking.services_id.as_slice(), booking.client_id)
        {
            ([service_id], Some(client_id)) => (*service_id, client_id),
            _ => return None,
        };

        let procedures = match self.resolve_procedures(&service_id, details).await {
            Some(count) if count > 1 => count,
            _ => return None,
        };

        let result = self
            .attach_or_create(booking, service_id, client_id, procedures, actor)
            .await;
        match result {
            Ok(package) => Some(package.id),
            Err(e) => {
                warn!(
                    booking_id = %booking.id,
                    service_id = %service_id,
                    error = %e,
                    "Package linkage failed, booking stands without a package"
                );
                None
            }
        }
    }

    /// Session-count resolution priority: per-booking detail override, then
    /// the service configuration (explicit count, then legacy list head).
    async fn resolve_procedures(
        &self,
        service_id: &ServiceId,
        details: &[ServiceDetail],
    ) -> Option<u32> {
        if let Some(count) = details
            .iter()
            .find(|d| d.service_id == *service_id)
            .and_then(|d| d.procedures)
        {
            return Some(count);
        }
        let service = self.service_provider.find_by_id(service_id).await.ok()??;
        service.configured_procedures()
    }

    async fn attach_or_create(
        &self,
        booking: &Booking,
        service_id: ServiceId,
        client_id: ClientId,
        procedures: u32,
        actor: &UserId,
    ) -> Result<Package, DomainError> {
        let packages = self
            .package_tracker
            .packages_for(&booking.commerce_id, &client_id, &service_id)
            .await?;

        if let Some(open) = packages.into_iter().find(|p| p.is_open()) {
            return self
                .package_tracker
                .add_booking_to_package(actor, &open.id, &[booking.id], &[])
                .await;
        }

        let name = details_name(&booking.services_details, &service_id)
            .unwrap_or_else(|| format!("Package ({} sessions)", procedures));
        self.package_tracker
            .create_package(
                actor,
                NewPackage {
                    commerce_id: booking.commerce_id,
                    client_id,
                    service_id,
                    name,
                    procedures_amount: procedures,
                    first_booking_id: booking.id,
                    status: PackageStatus::Active,
                },
            )
            .await
    }
}

fn default_status(commerce: &Commerce) -> BookingStatus {
    if commerce.feature_active(FEATURE_BOOKING_CONFIRM) {
        BookingStatus::Pending
    } else {
        BookingStatus::Confirmed
    }
}

fn details_name(details: &[ServiceDetail], service_id: &ServiceId) -> Option<String> {
    details
        .iter()
        .find(|d| d.service_id == *service_id)
        .and_then(|d| d.name.clone())
}

//! ProcessBookingsHandler - end-of-day reconciliation for still-pending
//! bookings.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::{Booking, BookingError};
use crate::domain::catalog::FEATURE_BOOKING_CONFIRM;
use crate::domain::foundation::DayDate;
use crate::ports::{BookingRepository, CommerceProvider, TakenBlockLedger};

/// Command to reconcile one calendar day.
#[derive(Debug, Clone)]
pub struct ProcessBookingsCommand {
    pub date: DayDate,
}

/// Per-day reconciliation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessBookingsSummary {
    /// Pending bookings expired (booking-confirm commerces).
    pub expired: u32,

    /// Pending bookings confirmed at closeout (other commerces).
    pub confirmed: u32,

    /// Bookings already handled by an earlier run.
    pub skipped: u32,

    /// Bookings whose closeout failed; they stay eligible for a re-run.
    pub failed: u32,
}

/// Batch handler applying the commerce closeout policy.
///
/// Commerces running the confirmation flow expire bookings never confirmed
/// by day end; the rest get their pending bookings confirmed. Re-runs are
/// no-ops: handled bookings leave the Pending state and carry `processed`.
pub struct ProcessBookingsHandler {
    booking_repository: Arc<dyn BookingRepository>,
    commerce_provider: Arc<dyn CommerceProvider>,
    ledger: Arc<dyn TakenBlockLedger>,
}

impl ProcessBookingsHandler {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        commerce_provider: Arc<dyn CommerceProvider>,
        ledger: Arc<dyn TakenBlockLedger>,
    ) -> Self {
        Self {
            booking_repository,
            commerce_provider,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessBookingsCommand,
    ) -> Result<ProcessBookingsSummary, BookingError> {
        let pending = self
            .booking_repository
            .find_pending_between(&cmd.date, &cmd.date)
            .await?;

        let mut summary = ProcessBookingsSummary::default();
        for booking in pending {
            if booking.processed {
                summary.skipped += 1;
                continue;
            }
            match self.close_out(booking).await {
                Ok(expired) => {
                    if expired {
                        summary.expired += 1;
                    } else {
                        summary.confirmed += 1;
                    }
                }
                Err((booking_id, e)) => {
                    warn!(%booking_id, error = %e, "Booking closeout failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            date = %cmd.date,
            expired = summary.expired,
            confirmed = summary.confirmed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Booking closeout finished"
        );
        Ok(summary)
    }

    /// Applies the closeout policy to one booking. Returns whether it was
    /// expired (as opposed to confirmed).
    async fn close_out(
        &self,
        mut booking: Booking,
    ) -> Result<bool, (crate::domain::foundation::BookingId, BookingError)> {
        let id = booking.id;
        let run = async {
            let commerce = self
                .commerce_provider
                .find_by_id(&booking.commerce_id)
                .await?
                .ok_or_else(|| BookingError::CommerceNotFound(booking.commerce_id.to_string()))?;

            let expire = commerce.feature_active(FEATURE_BOOKING_CONFIRM);
            if expire {
                booking.expire()?;
                if let Some(selection) = &booking.block {
                    self.ledger
                        .release(&booking.queue_id, &booking.date, selection)
                        .await?;
                }
            } else {
                booking.confirm()?;
            }
            booking.mark_processed();
            self.booking_repository.update(&booking).await?;
            Ok(expire)
        };
        run.await.map_err(|e: BookingError| (id, e))
    }
}

//! CreateBookingFromWaitlistHandler - claims a freed slot for a waitlisted
//! client.

use std::sync::Arc;

use crate::application::handlers::booking::{CreateBookingCommand, CreateBookingHandler};
use crate::domain::booking::{Booking, BookingStatus, TelemedicineRequest};
use crate::domain::catalog::{BlockSelection, ServiceDetail};
use crate::domain::foundation::{ServiceId, UserId, WaitlistEntryId};
use crate::domain::waitlist::WaitlistError;
use crate::ports::WaitlistRepository;

/// Command to turn a waitlist entry into a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingFromWaitlistCommand {
    pub entry_id: WaitlistEntryId,
    pub block: Option<BlockSelection>,
    pub explicit_status: Option<BookingStatus>,
    pub services_id: Vec<ServiceId>,
    pub services_details: Vec<ServiceDetail>,
    pub telemedicine: Option<TelemedicineRequest>,
    pub acting_user: UserId,
}

/// Handler claiming slots for waitlisted clients.
///
/// Delegates the actual creation to the booking flow, so capacity and slot
/// rules apply exactly as for a direct booking. The entry is promoted only
/// after the booking stands.
pub struct CreateBookingFromWaitlistHandler {
    waitlist_repository: Arc<dyn WaitlistRepository>,
    create_booking: Arc<CreateBookingHandler>,
}

impl CreateBookingFromWaitlistHandler {
    pub fn new(
        waitlist_repository: Arc<dyn WaitlistRepository>,
        create_booking: Arc<CreateBookingHandler>,
    ) -> Self {
        Self {
            waitlist_repository,
            create_booking,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingFromWaitlistCommand,
    ) -> Result<Booking, WaitlistError> {
        let mut entry = self
            .waitlist_repository
            .find_by_id(&cmd.entry_id)
            .await?
            .ok_or(WaitlistError::NotFound(cmd.entry_id))?;
        if !entry.is_promotable() {
            return Err(WaitlistError::AlreadyPromoted(entry.id));
        }

        let booking = self
            .create_booking
            .handle(CreateBookingCommand {
                queue_id: entry.queue_id,
                date: entry.date,
                channel: entry.channel.clone(),
                user: entry.user.clone(),
                client_id: entry.client_id,
                block: cmd.block,
                explicit_status: cmd.explicit_status,
                services_id: cmd.services_id,
                services_details: cmd.services_details,
                telemedicine: cmd.telemedicine,
                session_id: None,
                acting_user: cmd.acting_user,
            })
            .await?;

        entry.promote(booking.id)?;
        self.waitlist_repository.update(&entry).await?;

        Ok(booking)
    }
}

//! CreateBookingHandler - command handler for creating bookings.

use std::sync::Arc;

use tracing::warn;

use crate::application::booking_factory::{BookingDraft, BookingFactory};
use crate::domain::booking::{
    Booking, BookingCreated, BookingError, BookingStatus, TakenBlockRecord, TelemedicineRequest,
};
use crate::domain::catalog::{BlockSelection, Queue, ServiceDetail, UserSnapshot};
use crate::domain::foundation::{
    ClientId, DayDate, DomainError, ErrorCode, EventId, QueueId, SerializableDomainEvent,
    ServiceId, SessionKey, Timestamp, UserId,
};
use crate::ports::{
    BookingNotification, BookingRepository, CommerceProvider, EventPublisher,
    NotificationDispatcher, QueueProvider, TakenBlockLedger,
};

/// Command to create a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub queue_id: QueueId,
    pub date: DayDate,
    pub channel: String,
    pub user: UserSnapshot,
    pub client_id: Option<ClientId>,
    pub block: Option<BlockSelection>,
    pub explicit_status: Option<BookingStatus>,
    pub services_id: Vec<ServiceId>,
    pub services_details: Vec<ServiceDetail>,
    pub telemedicine: Option<TelemedicineRequest>,

    /// Reuses an in-flight reservation session when the caller already holds
    /// one; a fresh session is minted otherwise.
    pub session_id: Option<SessionKey>,

    pub acting_user: UserId,
}

/// Handler for booking creation.
pub struct CreateBookingHandler {
    queue_provider: Arc<dyn QueueProvider>,
    commerce_provider: Arc<dyn CommerceProvider>,
    booking_repository: Arc<dyn BookingRepository>,
    ledger: Arc<dyn TakenBlockLedger>,
    factory: Arc<BookingFactory>,
    notifications: Arc<dyn NotificationDispatcher>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateBookingHandler {
    pub fn new(
        queue_provider: Arc<dyn QueueProvider>,
        commerce_provider: Arc<dyn CommerceProvider>,
        booking_repository: Arc<dyn BookingRepository>,
        ledger: Arc<dyn TakenBlockLedger>,
        factory: Arc<BookingFactory>,
        notifications: Arc<dyn NotificationDispatcher>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            queue_provider,
            commerce_provider,
            booking_repository,
            ledger,
            factory,
            notifications,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        let queue = self
            .queue_provider
            .find_by_id(&cmd.queue_id)
            .await?
            .ok_or(BookingError::QueueNotFound(cmd.queue_id))?;
        let commerce = self
            .commerce_provider
            .find_by_id(&queue.commerce_id)
            .await?
            .ok_or_else(|| BookingError::CommerceNotFound(queue.commerce_id.to_string()))?;

        if !cmd.user.accept_terms_and_conditions {
            return Err(BookingError::TermsNotAccepted);
        }

        let active = self
            .booking_repository
            .count_active_for_day(&cmd.queue_id, &cmd.date)
            .await?;
        if active >= queue.daily_limit {
            return Err(BookingError::capacity_exceeded(
                cmd.queue_id,
                cmd.date,
                queue.daily_limit,
            ));
        }

        let session_id = cmd.session_id.unwrap_or_default();
        let reserved = match &cmd.block {
            Some(selection) => {
                self.reserve_blocks(&queue, &cmd.date, selection, session_id)
                    .await?;
                true
            }
            None => false,
        };

        let number = match self
            .booking_repository
            .next_number_for_day(&cmd.queue_id, &cmd.date)
            .await
        {
            Ok(number) => number,
            Err(e) => {
                self.rollback_reservation(reserved, &cmd, &queue).await;
                return Err(e.into());
            }
        };

        let draft = BookingDraft {
            queue: queue.clone(),
            commerce,
            date: cmd.date,
            number,
            channel: cmd.channel.clone(),
            user: cmd.user.clone(),
            client_id: cmd.client_id,
            block: cmd.block.clone(),
            explicit_status: cmd.explicit_status,
            services_id: cmd.services_id.clone(),
            services_details: cmd.services_details.clone(),
            telemedicine: cmd.telemedicine.clone(),
            session_id,
            acting_user: cmd.acting_user.clone(),
        };

        let booking = match self.factory.create(draft).await {
            Ok(booking) => booking,
            Err(e) => {
                self.rollback_reservation(reserved, &cmd, &queue).await;
                return Err(e.into());
            }
        };

        self.fan_out(&booking, &queue, &cmd.acting_user).await;

        Ok(booking)
    }

    /// Collision pre-check against the current ledger state, then the atomic
    /// reserve. The pre-check gives a precise error; the reserve closes the
    /// race.
    async fn reserve_blocks(
        &self,
        queue: &Queue,
        date: &DayDate,
        selection: &BlockSelection,
        session_id: SessionKey,
    ) -> Result<(), BookingError> {
        let taken = self
            .ledger
            .find_taken(&queue.id, date, Some(&session_id))
            .await?;
        if let Some(held) = taken.iter().find(|r| selection.occupies(r.block_number)) {
            return Err(BookingError::slot_taken(queue.id, *date, held.block_number));
        }

        let records = TakenBlockRecord::from_selection(queue.id, *date, selection, session_id);
        self.ledger.reserve(&records).await.map_err(|e| {
            if e.code == ErrorCode::SlotTaken {
                let block_number = e
                    .details
                    .get("block_number")
                    .and_then(|n| n.parse().ok())
                    .unwrap_or_else(|| selection.numbers()[0]);
                BookingError::slot_taken(queue.id, *date, block_number)
            } else {
                e.into()
            }
        })
    }

    async fn rollback_reservation(
        &self,
        reserved: bool,
        cmd: &CreateBookingCommand,
        queue: &Queue,
    ) {
        if !reserved {
            return;
        }
        if let Some(selection) = &cmd.block {
            if let Err(e) = self.ledger.release(&queue.id, &cmd.date, selection).await {
                warn!(
                    queue_id = %queue.id,
                    date = %cmd.date,
                    error = %e,
                    "Failed to release blocks after aborted creation"
                );
            }
        }
    }

    /// Side-channel fan-out. Failures are logged and never propagated.
    async fn fan_out(&self, booking: &Booking, queue: &Queue, acting_user: &UserId) {
        let notification = BookingNotification {
            booking_id: booking.id,
            commerce_id: booking.commerce_id,
            queue_id: booking.queue_id,
            queue_name: queue.name.clone(),
            date: booking.date,
            number: booking.number,
            channel: booking.channel.clone(),
            user: booking.user.clone(),
        };
        if let Err(e) = self.notifications.send_booking_created(&notification).await {
            warn!(booking_id = %booking.id, error = %e, "Creation notification failed");
        }

        let event = BookingCreated {
            event_id: EventId::new(),
            booking_id: booking.id,
            queue_id: booking.queue_id,
            date: booking.date,
            number: booking.number,
            acting_user_id: acting_user.to_string(),
            occurred_at: Timestamp::now(),
        };
        let envelope = event.to_envelope().with_user(acting_user.to_string());
        if let Err(e) = self.event_publisher.publish(envelope).await {
            warn!(booking_id = %booking.id, error = %e, "Creation event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryBookingRepository, InMemoryDirectory, InMemoryPackageTracker,
        InMemoryTakenBlockLedger,
    };
    use crate::domain::catalog::{Block, Commerce, Feature, LocaleInfo, FEATURE_BOOKING_CONFIRM};
    use crate::domain::foundation::CommerceId;
    use crate::ports::WaitlistSlotOpen;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingDispatcher {
        created: Mutex<Vec<BookingNotification>>,
        fail: bool,
    }

    impl RecordingDispatcher {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn created(&self) -> Vec<BookingNotification> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationDispatcher for RecordingDispatcher {
        async fn send_booking_created(
            &self,
            notification: &BookingNotification,
        ) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::transient("notifications", "down"));
            }
            self.created.lock().unwrap().push(notification.clone());
            Ok(())
        }

        async fn send_booking_cancelled(
            &self,
            _: &BookingNotification,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_booking_reminder(
            &self,
            _: &BookingNotification,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_waitlist_slot_open(
            &self,
            _: &WaitlistSlotOpen,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct Fixture {
        directory: Arc<InMemoryDirectory>,
        repo: Arc<InMemoryBookingRepository>,
        ledger: Arc<InMemoryTakenBlockLedger>,
        dispatcher: Arc<RecordingDispatcher>,
        bus: Arc<InMemoryEventBus>,
        handler: CreateBookingHandler,
        queue: Queue,
    }

    fn fixture_with(dispatcher: RecordingDispatcher, daily_limit: u32) -> Fixture {
        let directory = Arc::new(InMemoryDirectory::new());
        let repo = Arc::new(InMemoryBookingRepository::new());
        let ledger = Arc::new(InMemoryTakenBlockLedger::new());
        let dispatcher = Arc::new(dispatcher);
        let bus = Arc::new(InMemoryEventBus::new());
        let tracker = Arc::new(InMemoryPackageTracker::new());

        let commerce = Commerce {
            id: CommerceId::new(),
            name: "Clinic".to_string(),
            features: vec![Feature {
                name: FEATURE_BOOKING_CONFIRM.to_string(),
                active: false,
            }],
            locale_info: LocaleInfo::default(),
            telemedicine_recording_enabled: false,
        };
        let queue = Queue {
            id: QueueId::new(),
            commerce_id: commerce.id,
            name: "General".to_string(),
            daily_limit,
            blocks: vec![Block::new(1, "09:00", "09:30"), Block::new(2, "09:30", "10:00")],
            block_limit: None,
        };
        directory.insert_commerce(commerce);
        directory.insert_queue(queue.clone());

        let factory = Arc::new(BookingFactory::new(
            repo.clone(),
            directory.clone(),
            tracker,
        ));
        let handler = CreateBookingHandler::new(
            directory.clone(),
            directory.clone(),
            repo.clone(),
            ledger.clone(),
            factory,
            dispatcher.clone(),
            bus.clone(),
        );
        Fixture {
            directory,
            repo,
            ledger,
            dispatcher,
            bus,
            handler,
            queue,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingDispatcher::new(), 10)
    }

    fn command(queue_id: QueueId) -> CreateBookingCommand {
        CreateBookingCommand {
            queue_id,
            date: DayDate::today().add_days(1),
            channel: "web".to_string(),
            user: UserSnapshot::new("Ana"),
            client_id: None,
            block: None,
            explicit_status: None,
            services_id: vec![],
            services_details: vec![],
            telemedicine: None,
            session_id: None,
            acting_user: UserId::new("user-1").unwrap(),
        }
    }

    fn block_command(queue: &Queue) -> CreateBookingCommand {
        let mut cmd = command(queue.id);
        cmd.block = Some(BlockSelection::single(queue.blocks[0].clone()));
        cmd
    }

    #[tokio::test]
    async fn creates_booking_and_fans_out() {
        let f = fixture();
        let booking = f.handler.handle(command(f.queue.id)).await.unwrap();

        assert_eq!(booking.number, 1);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(f.repo.find_by_id(&booking.id).await.unwrap().is_some());

        let sent = f.dispatcher.created();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].booking_id, booking.id);
        assert_eq!(f.bus.events_of_type("booking.created.v1").len(), 1);
    }

    #[tokio::test]
    async fn unknown_queue_fails() {
        let f = fixture();
        let err = f.handler.handle(command(QueueId::new())).await.unwrap_err();
        assert!(matches!(err, BookingError::QueueNotFound(_)));
    }

    #[tokio::test]
    async fn declined_terms_fail_before_any_write() {
        let f = fixture();
        let mut cmd = block_command(&f.queue);
        cmd.user = UserSnapshot::new("Ana").declining_terms();
        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, BookingError::TermsNotAccepted));
        let taken = f
            .ledger
            .find_taken(&f.queue.id, &DayDate::today().add_days(1), None)
            .await
            .unwrap();
        assert!(taken.is_empty());
    }

    #[tokio::test]
    async fn capacity_allows_limit_then_rejects() {
        let f = fixture_with(RecordingDispatcher::new(), 2);
        f.handler.handle(command(f.queue.id)).await.unwrap();
        f.handler.handle(command(f.queue.id)).await.unwrap();

        let err = f.handler.handle(command(f.queue.id)).await.unwrap_err();
        assert!(matches!(err, BookingError::CapacityExceeded { limit: 2, .. }));
    }

    #[tokio::test]
    async fn same_block_twice_fails_slot_taken() {
        let f = fixture();
        f.handler.handle(block_command(&f.queue)).await.unwrap();

        let err = f.handler.handle(block_command(&f.queue)).await.unwrap_err();
        assert!(matches!(err, BookingError::SlotTaken { block_number: 1, .. }));
    }

    #[tokio::test]
    async fn numbers_are_sequential_per_day() {
        let f = fixture();
        let first = f.handler.handle(command(f.queue.id)).await.unwrap();
        let second = f.handler.handle(command(f.queue.id)).await.unwrap();
        assert_eq!(first.number, 1);
        assert_eq!(second.number, 2);
    }

    #[tokio::test]
    async fn failed_factory_releases_reserved_blocks() {
        let f = fixture();
        let mut cmd = block_command(&f.queue);
        // Past telemedicine schedule makes the factory reject the draft.
        cmd.telemedicine = Some(TelemedicineRequest {
            scheduled_at: Timestamp::now().add_days(-1),
        });
        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));

        // The block must be bookable again.
        f.handler.handle(block_command(&f.queue)).await.unwrap();
    }

    #[tokio::test]
    async fn notification_outage_does_not_fail_creation() {
        let f = fixture_with(RecordingDispatcher::failing(), 10);
        let booking = f.handler.handle(command(f.queue.id)).await.unwrap();
        assert!(f.repo.find_by_id(&booking.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn commerce_missing_from_directory_fails() {
        let f = fixture();
        let orphan = Queue {
            id: QueueId::new(),
            commerce_id: CommerceId::new(),
            name: "Orphan".to_string(),
            daily_limit: 5,
            blocks: vec![],
            block_limit: None,
        };
        f.directory.insert_queue(orphan.clone());
        let err = f.handler.handle(command(orphan.id)).await.unwrap_err();
        assert!(matches!(err, BookingError::CommerceNotFound(_)));
    }
}

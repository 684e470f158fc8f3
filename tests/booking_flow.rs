//! End-to-end booking flows over the in-memory adapters.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use slotline::adapters::events::InMemoryEventBus;
use slotline::adapters::memory::{
    InMemoryBookingRepository, InMemoryDirectory, InMemoryPackageTracker, InMemoryTakenBlockLedger,
    InMemoryWaitlistRepository,
};
use slotline::application::handlers::booking::{
    CancelBookingCommand, CancelBookingHandler, ConfirmNotifyBookingsCommand,
    ConfirmNotifyBookingsHandler, CreateBookingCommand, CreateBookingHandler,
    GetBookingDetailsHandler, GetBookingDetailsQuery, ProcessBookingsCommand,
    ProcessBookingsHandler,
};
use slotline::application::handlers::waitlist::{
    CreateBookingFromWaitlistCommand, CreateBookingFromWaitlistHandler, CreateWaitlistCommand,
    CreateWaitlistHandler, PromoteWaitlistHandler,
};
use slotline::application::BookingFactory;
use slotline::domain::booking::{BookingError, BookingStatus, TelemedicineRequest};
use slotline::domain::catalog::{
    Block, BlockSelection, Commerce, Feature, LocaleInfo, Queue, Service, UserSnapshot,
    FEATURE_BOOKING_CONFIRM,
};
use slotline::domain::foundation::{
    ClientId, CommerceId, DayDate, DomainError, QueueId, ServiceId, Timestamp, UserId,
};
use slotline::domain::waitlist::WaitlistError;
use slotline::ports::{BookingNotification, NotificationDispatcher, WaitlistSlotOpen};

/// Dispatcher capturing every outbound notification.
#[derive(Default)]
struct RecordingDispatcher {
    created: Mutex<Vec<BookingNotification>>,
    cancelled: Mutex<Vec<BookingNotification>>,
    reminders: Mutex<Vec<BookingNotification>>,
    slot_opens: Mutex<Vec<WaitlistSlotOpen>>,
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_booking_created(&self, n: &BookingNotification) -> Result<(), DomainError> {
        self.created.lock().unwrap().push(n.clone());
        Ok(())
    }

    async fn send_booking_cancelled(&self, n: &BookingNotification) -> Result<(), DomainError> {
        self.cancelled.lock().unwrap().push(n.clone());
        Ok(())
    }

    async fn send_booking_reminder(&self, n: &BookingNotification) -> Result<(), DomainError> {
        self.reminders.lock().unwrap().push(n.clone());
        Ok(())
    }

    async fn send_waitlist_slot_open(&self, n: &WaitlistSlotOpen) -> Result<(), DomainError> {
        self.slot_opens.lock().unwrap().push(n.clone());
        Ok(())
    }
}

struct App {
    directory: Arc<InMemoryDirectory>,
    dispatcher: Arc<RecordingDispatcher>,
    create: Arc<CreateBookingHandler>,
    cancel: Arc<CancelBookingHandler>,
    process: Arc<ProcessBookingsHandler>,
    reminders: Arc<ConfirmNotifyBookingsHandler>,
    details: Arc<GetBookingDetailsHandler>,
    create_waitlist: Arc<CreateWaitlistHandler>,
    claim: Arc<CreateBookingFromWaitlistHandler>,
    queue: Queue,
    commerce: Commerce,
}

fn app_with(daily_limit: u32, features: Vec<Feature>) -> App {
    let directory = Arc::new(InMemoryDirectory::new());
    let repo = Arc::new(InMemoryBookingRepository::new());
    let ledger = Arc::new(InMemoryTakenBlockLedger::new());
    let waitlist = Arc::new(InMemoryWaitlistRepository::new());
    let tracker = Arc::new(InMemoryPackageTracker::new());
    let dispatcher = Arc::new(RecordingDispatcher::default());

    let commerce = Commerce {
        id: CommerceId::new(),
        name: "Clinic".to_string(),
        features,
        locale_info: LocaleInfo::default(),
        telemedicine_recording_enabled: true,
    };
    let queue = Queue {
        id: QueueId::new(),
        commerce_id: commerce.id,
        name: "General".to_string(),
        daily_limit,
        blocks: vec![
            Block::new(1, "09:00", "09:30"),
            Block::new(2, "09:30", "10:00"),
        ],
        block_limit: None,
    };
    directory.insert_commerce(commerce.clone());
    directory.insert_queue(queue.clone());

    let factory = Arc::new(BookingFactory::new(repo.clone(), directory.clone(), tracker));
    let create = Arc::new(CreateBookingHandler::new(
        directory.clone(),
        directory.clone(),
        repo.clone(),
        ledger.clone(),
        factory,
        dispatcher.clone(),
        Arc::new(InMemoryEventBus::new()),
    ));
    let promoter = Arc::new(PromoteWaitlistHandler::new(
        waitlist.clone(),
        dispatcher.clone(),
        "http://booking.example.com",
    ));
    let cancel = Arc::new(CancelBookingHandler::new(
        repo.clone(),
        ledger.clone(),
        directory.clone(),
        dispatcher.clone(),
        Arc::new(InMemoryEventBus::new()),
        promoter,
    ));
    let process = Arc::new(ProcessBookingsHandler::new(
        repo.clone(),
        directory.clone(),
        ledger,
    ));
    let reminders = Arc::new(ConfirmNotifyBookingsHandler::new(
        repo.clone(),
        directory.clone(),
        dispatcher.clone(),
    ));
    let details = Arc::new(GetBookingDetailsHandler::new(
        repo,
        directory.clone(),
        directory.clone(),
    ));
    let create_waitlist = Arc::new(CreateWaitlistHandler::new(
        waitlist.clone(),
        directory.clone(),
        directory.clone(),
        directory.clone(),
    ));
    let claim = Arc::new(CreateBookingFromWaitlistHandler::new(
        waitlist,
        create.clone(),
    ));

    App {
        directory,
        dispatcher,
        create,
        cancel,
        process,
        reminders,
        details,
        create_waitlist,
        claim,
        queue,
        commerce,
    }
}

fn app() -> App {
    app_with(10, vec![])
}

fn base_cmd(app: &App, date: DayDate) -> CreateBookingCommand {
    CreateBookingCommand {
        queue_id: app.queue.id,
        date,
        channel: "web".to_string(),
        user: UserSnapshot::new("Ana").with_email("ana@example.com"),
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

fn tomorrow() -> DayDate {
    DayDate::today().add_days(1)
}

fn block_one() -> BlockSelection {
    BlockSelection::single(Block::new(1, "09:00", "09:30"))
}

#[tokio::test]
async fn daily_limit_is_enforced_exactly() {
    let app = app_with(2, vec![]);
    let date = tomorrow();

    app.create.handle(base_cmd(&app, date)).await.unwrap();
    app.create.handle(base_cmd(&app, date)).await.unwrap();

    let err = app.create.handle(base_cmd(&app, date)).await.unwrap_err();
    assert!(matches!(
        err,
        BookingError::CapacityExceeded { limit: 2, .. }
    ));
}

#[tokio::test]
async fn block_is_exclusive_until_cancelled() {
    let app = app();
    let date = tomorrow();

    let mut cmd = base_cmd(&app, date);
    cmd.block = Some(block_one());
    let first = app.create.handle(cmd.clone()).await.unwrap();

    let err = app.create.handle(cmd.clone()).await.unwrap_err();
    assert!(matches!(
        err,
        BookingError::SlotTaken {
            block_number: 1,
            ..
        }
    ));

    app.cancel
        .handle(CancelBookingCommand {
            booking_id: first.id,
            acting_user: UserId::new("user-1").unwrap(),
        })
        .await
        .unwrap();

    // The freed block can be taken again.
    app.create.handle(cmd).await.unwrap();
}

#[tokio::test]
async fn cancellation_offers_slot_and_entry_promotes_once() {
    let app = app();
    let date = tomorrow();

    let entry = app
        .create_waitlist
        .handle(CreateWaitlistCommand {
            queue_id: app.queue.id,
            date,
            channel: "web".to_string(),
            user: UserSnapshot::new("Bea").with_phone("123"),
            client_id: None,
        })
        .await
        .unwrap();

    let mut cmd = base_cmd(&app, date);
    cmd.block = Some(block_one());
    let booking = app.create.handle(cmd).await.unwrap();

    app.cancel
        .handle(CancelBookingCommand {
            booking_id: booking.id,
            acting_user: UserId::new("user-1").unwrap(),
        })
        .await
        .unwrap();

    let opens = app.dispatcher.slot_opens.lock().unwrap().clone();
    assert_eq!(opens.len(), 1);
    assert_eq!(opens[0].entry_id, entry.id);
    assert!(opens[0].claim_url.contains(&entry.id.to_string()));

    let claim_cmd = CreateBookingFromWaitlistCommand {
        entry_id: entry.id,
        block: None,
        explicit_status: None,
        services_id: vec![],
        services_details: vec![],
        telemedicine: None,
        acting_user: UserId::new("user-2").unwrap(),
    };
    app.claim.handle(claim_cmd.clone()).await.unwrap();

    let err = app.claim.handle(claim_cmd).await.unwrap_err();
    assert_eq!(err, WaitlistError::AlreadyPromoted(entry.id));
}

#[tokio::test]
async fn declined_terms_never_produce_a_booking() {
    let app = app();
    let date = tomorrow();

    let mut cmd = base_cmd(&app, date);
    cmd.user = UserSnapshot::new("Ana").declining_terms();

    let err = app.create.handle(cmd).await.unwrap_err();
    assert!(matches!(err, BookingError::TermsNotAccepted));
    assert!(app.dispatcher.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn package_chain_spans_sessions_and_rolls_over() {
    let app = app();
    let date = tomorrow();

    let service = Service {
        id: ServiceId::new(),
        name: "Physio".to_string(),
        procedures: Some(3),
        procedures_list: None,
        blocks_needed: None,
    };
    app.directory.insert_service(service.clone());
    let client_id = ClientId::new();

    let mut cmd = base_cmd(&app, date);
    cmd.client_id = Some(client_id);
    cmd.services_id = vec![service.id];

    let first = app.create.handle(cmd.clone()).await.unwrap();
    let package_id = first.package_id.expect("first session opens a package");

    let second = app.create.handle(cmd.clone()).await.unwrap();
    assert_eq!(second.package_id, Some(package_id));
    let third = app.create.handle(cmd.clone()).await.unwrap();
    assert_eq!(third.package_id, Some(package_id));

    // The package is consumed; the next booking starts a fresh one.
    let fourth = app.create.handle(cmd).await.unwrap();
    let new_package = fourth.package_id.expect("exhausted package rolls over");
    assert_ne!(new_package, package_id);
}

#[tokio::test]
async fn anonymous_or_single_session_bookings_stay_unlinked() {
    let app = app();
    let date = tomorrow();

    let single = Service {
        id: ServiceId::new(),
        name: "Checkup".to_string(),
        procedures: Some(1),
        procedures_list: None,
        blocks_needed: None,
    };
    app.directory.insert_service(single.clone());

    // Known client but a one-session service.
    let mut cmd = base_cmd(&app, date);
    cmd.client_id = Some(ClientId::new());
    cmd.services_id = vec![single.id];
    let booking = app.create.handle(cmd).await.unwrap();
    assert_eq!(booking.package_id, None);

    // Multi-session service but no client.
    let multi = Service {
        id: ServiceId::new(),
        name: "Physio".to_string(),
        procedures: Some(3),
        procedures_list: None,
        blocks_needed: None,
    };
    app.directory.insert_service(multi.clone());
    let mut cmd = base_cmd(&app, date);
    cmd.services_id = vec![multi.id];
    let booking = app.create.handle(cmd).await.unwrap();
    assert_eq!(booking.package_id, None);
}

#[tokio::test]
async fn telemedicine_booking_carries_commerce_recording_setting() {
    let app = app();
    let date = tomorrow();

    let mut cmd = base_cmd(&app, date);
    cmd.telemedicine = Some(TelemedicineRequest {
        scheduled_at: Timestamp::now().add_days(1),
    });
    let booking = app.create.handle(cmd).await.unwrap();
    assert!(booking.kind.is_telemedicine());

    let view = app
        .details
        .handle(GetBookingDetailsQuery {
            booking_id: booking.id,
        })
        .await
        .unwrap();
    assert_eq!(view.queue_name, app.queue.name);
    assert_eq!(view.commerce_name, app.commerce.name);
    assert_eq!(view.bookings_ahead, 0);
}

#[tokio::test]
async fn details_count_earlier_active_bookings() {
    let app = app();
    let date = tomorrow();

    app.create.handle(base_cmd(&app, date)).await.unwrap();
    let second = app.create.handle(base_cmd(&app, date)).await.unwrap();

    let view = app
        .details
        .handle(GetBookingDetailsQuery {
            booking_id: second.id,
        })
        .await
        .unwrap();
    assert_eq!(view.bookings_ahead, 1);
}

#[tokio::test]
async fn closeout_expires_pending_and_frees_blocks() {
    let app = app_with(
        10,
        vec![Feature {
            name: FEATURE_BOOKING_CONFIRM.to_string(),
            active: true,
        }],
    );
    let date = tomorrow();

    let mut cmd = base_cmd(&app, date);
    cmd.block = Some(block_one());
    let booking = app.create.handle(cmd.clone()).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);

    let summary = app
        .process
        .handle(ProcessBookingsCommand { date })
        .await
        .unwrap();
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.confirmed, 0);

    let view = app
        .details
        .handle(GetBookingDetailsQuery {
            booking_id: booking.id,
        })
        .await
        .unwrap();
    assert_eq!(view.booking.status, BookingStatus::Expired);

    // The expired booking no longer holds its block.
    app.create.handle(cmd).await.unwrap();
}

#[tokio::test]
async fn closeout_confirms_pending_without_confirm_flow() {
    let app = app();
    let date = tomorrow();

    let mut cmd = base_cmd(&app, date);
    cmd.explicit_status = Some(BookingStatus::Pending);
    let booking = app.create.handle(cmd).await.unwrap();

    let summary = app
        .process
        .handle(ProcessBookingsCommand { date })
        .await
        .unwrap();
    assert_eq!(summary.confirmed, 1);
    assert_eq!(summary.expired, 0);

    let view = app
        .details
        .handle(GetBookingDetailsQuery {
            booking_id: booking.id,
        })
        .await
        .unwrap();
    assert_eq!(view.booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn reminder_batch_sends_once_per_booking() {
    let app = app();
    let date = tomorrow();

    app.create.handle(base_cmd(&app, date)).await.unwrap();

    let summary = app
        .reminders
        .handle(ConfirmNotifyBookingsCommand { days_before: 1 })
        .await
        .unwrap();
    assert_eq!(summary.sent, 1);
    assert_eq!(app.dispatcher.reminders.lock().unwrap().len(), 1);

    // Already-reminded bookings are skipped on the next run.
    let summary = app
        .reminders
        .handle(ConfirmNotifyBookingsCommand { days_before: 1 })
        .await
        .unwrap();
    assert_eq!(summary.sent, 0);
    assert_eq!(app.dispatcher.reminders.lock().unwrap().len(), 1);
}

//! HTTP routes for booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_booking, create_booking, get_booking, get_booking_details, list_bookings,
    list_pending_bookings, process_bookings, send_reminders, BookingHandlers,
};

/// Creates the booking router with all endpoints.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/pending", get(list_pending_bookings))
        .route("/process", post(process_bookings))
        .route("/reminders", post(send_reminders))
        .route("/:id", get(get_booking))
        .route("/:id/details", get(get_booking_details))
        .route("/:id/cancel", post(cancel_booking))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::http::middleware::ServiceAuth;
    use crate::adapters::memory::{
        InMemoryBookingRepository, InMemoryDirectory, InMemoryPackageTracker,
        InMemoryTakenBlockLedger, InMemoryWaitlistRepository,
    };
    use crate::adapters::notifications::LoggingNotificationDispatcher;
    use crate::application::handlers::booking::{
        CancelBookingHandler, ConfirmNotifyBookingsHandler, CreateBookingCommand,
        CreateBookingHandler, GetBookingDetailsHandler, ListBookingsHandler,
        ProcessBookingsHandler,
    };
    use crate::application::handlers::waitlist::PromoteWaitlistHandler;
    use crate::application::BookingFactory;
    use crate::domain::catalog::{Block, Commerce, LocaleInfo, Queue, UserSnapshot};
    use crate::domain::foundation::{CommerceId, DayDate, QueueId, UserId};

    const SERVICE_TOKEN: &str = "sched-token";

    struct Fixture {
        router: Router,
        queue_id: QueueId,
        create: Arc<CreateBookingHandler>,
    }

    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryDirectory::new());
        let repo = Arc::new(InMemoryBookingRepository::new());
        let ledger = Arc::new(InMemoryTakenBlockLedger::new());
        let waitlist = Arc::new(InMemoryWaitlistRepository::new());
        let dispatcher = Arc::new(LoggingNotificationDispatcher::new());

        let commerce = Commerce {
            id: CommerceId::new(),
            name: "Clinic".to_string(),
            features: vec![],
            locale_info: LocaleInfo::default(),
            telemedicine_recording_enabled: false,
        };
        let queue = Queue {
            id: QueueId::new(),
            commerce_id: commerce.id,
            name: "General".to_string(),
            daily_limit: 10,
            blocks: vec![Block::new(1, "09:00", "09:30")],
            block_limit: None,
        };
        let queue_id = queue.id;
        directory.insert_commerce(commerce);
        directory.insert_queue(queue);

        let factory = Arc::new(BookingFactory::new(
            repo.clone(),
            directory.clone(),
            Arc::new(InMemoryPackageTracker::new()),
        ));
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
            waitlist,
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
            dispatcher,
        ));
        let details = Arc::new(GetBookingDetailsHandler::new(
            repo.clone(),
            directory.clone(),
            directory,
        ));
        let list = Arc::new(ListBookingsHandler::new(repo));

        let handlers = BookingHandlers::new(
            create.clone(),
            cancel,
            process,
            reminders,
            details,
            list,
            ServiceAuth::new(Some(SERVICE_TOKEN.to_string())),
            1,
        );

        Fixture {
            router: booking_routes(handlers),
            queue_id,
            create,
        }
    }

    fn create_body(queue_id: QueueId, date: DayDate) -> Body {
        Body::from(
            serde_json::json!({
                "queue_id": queue_id,
                "date": date,
                "channel": "web",
                "user": { "name": "Ana", "accept_terms_and_conditions": true }
            })
            .to_string(),
        )
    }

    async fn seed_booking(fixture: &Fixture, date: DayDate) -> crate::domain::booking::Booking {
        fixture
            .create
            .handle(CreateBookingCommand {
                queue_id: fixture.queue_id,
                date,
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
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_endpoint_returns_created_for_forwarded_identity() {
        let fixture = fixture();
        let date = DayDate::today().add_days(1);

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .header("x-user-id", "user-1")
                    .body(create_body(fixture.queue_id, date))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_endpoint_rejects_missing_identity() {
        let fixture = fixture();
        let date = DayDate::today().add_days(1);

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(create_body(fixture.queue_id, date))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_endpoint_returns_queue_day() {
        let fixture = fixture();
        let date = DayDate::today().add_days(1);
        seed_booking(&fixture, date).await;

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .uri(format!("/?queue_id={}&date={}", fixture.queue_id, date))
                    .header("x-user-id", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cancel_endpoint_cancels_existing_booking() {
        let fixture = fixture();
        let date = DayDate::today().add_days(1);
        let booking = seed_booking(&fixture, date).await;

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/{}/cancel", booking.id))
                    .header("x-user-id", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cancel_endpoint_rejects_malformed_id() {
        let fixture = fixture();

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/not-a-uuid/cancel")
                    .header("x-user-id", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn process_endpoint_requires_service_token() {
        let fixture = fixture();
        let date = DayDate::today().add_days(1);
        let body = serde_json::json!({ "date": date }).to_string();

        let response = fixture
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/process")
                    .header("content-type", "application/json")
                    .body(Body::from(body.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = fixture
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/process")
                    .header("content-type", "application/json")
                    .header("Authorization", "Bearer wrong-token")
                    .body(Body::from(body.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/process")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {}", SERVICE_TOKEN))
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn reminders_endpoint_requires_service_token() {
        let fixture = fixture();

        let response = fixture
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reminders")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = fixture
            .router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reminders")
                    .header("content-type", "application/json")
                    .header("Authorization", format!("Bearer {}", SERVICE_TOKEN))
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

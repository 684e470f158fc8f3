//! slotline service entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slotline::adapters::events::InMemoryEventBus;
use slotline::adapters::http::middleware::ServiceAuth;
use slotline::adapters::http::{booking_routes, waitlist_routes, BookingHandlers, WaitlistHandlers};
use slotline::adapters::memory::{InMemoryDirectory, InMemoryPackageTracker};
use slotline::adapters::notifications::{
    LoggingNotificationDispatcher, WebhookNotificationDispatcher,
};
use slotline::adapters::postgres::{
    PostgresBookingRepository, PostgresTakenBlockLedger, PostgresWaitlistRepository,
};
use slotline::application::handlers::booking::{
    CancelBookingHandler, ConfirmNotifyBookingsHandler, CreateBookingHandler,
    GetBookingDetailsHandler, ListBookingsHandler, ProcessBookingsHandler,
};
use slotline::application::handlers::waitlist::{
    CreateBookingFromWaitlistHandler, CreateWaitlistHandler, PromoteWaitlistHandler,
};
use slotline::application::BookingFactory;
use slotline::config::AppConfig;
use slotline::ports::NotificationDispatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Loaded configuration"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Database connection pool created");

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        info!("Database migrations applied");
    }

    let booking_repository = Arc::new(PostgresBookingRepository::new(pool.clone()));
    let ledger = Arc::new(PostgresTakenBlockLedger::new(pool.clone()));
    let waitlist_repository = Arc::new(PostgresWaitlistRepository::new(pool));

    // The catalog and package systems are external collaborators; the
    // in-process directory stands in until their HTTP clients are wired up.
    let directory = Arc::new(InMemoryDirectory::new());
    let package_tracker = Arc::new(InMemoryPackageTracker::new());

    let notifications: Arc<dyn NotificationDispatcher> =
        if config.notifications.webhook_enabled() {
            Arc::new(WebhookNotificationDispatcher::new(
                config.notifications.clone(),
            )?)
        } else {
            Arc::new(LoggingNotificationDispatcher::new())
        };
    let event_bus = Arc::new(InMemoryEventBus::new());

    let factory = Arc::new(BookingFactory::new(
        booking_repository.clone(),
        directory.clone(),
        package_tracker,
    ));
    let create_booking = Arc::new(CreateBookingHandler::new(
        directory.clone(),
        directory.clone(),
        booking_repository.clone(),
        ledger.clone(),
        factory,
        notifications.clone(),
        event_bus.clone(),
    ));
    let promoter = Arc::new(PromoteWaitlistHandler::new(
        waitlist_repository.clone(),
        notifications.clone(),
        config.notifications.claim_base_url.clone(),
    ));
    let cancel_booking = Arc::new(CancelBookingHandler::new(
        booking_repository.clone(),
        ledger.clone(),
        directory.clone(),
        notifications.clone(),
        event_bus.clone(),
        promoter,
    ));
    let process_bookings = Arc::new(ProcessBookingsHandler::new(
        booking_repository.clone(),
        directory.clone(),
        ledger,
    ));
    let send_reminders = Arc::new(ConfirmNotifyBookingsHandler::new(
        booking_repository.clone(),
        directory.clone(),
        notifications,
    ));
    let booking_details = Arc::new(GetBookingDetailsHandler::new(
        booking_repository.clone(),
        directory.clone(),
        directory.clone(),
    ));
    let list_bookings = Arc::new(ListBookingsHandler::new(booking_repository));

    let create_waitlist = Arc::new(CreateWaitlistHandler::new(
        waitlist_repository.clone(),
        directory.clone(),
        directory.clone(),
        directory,
    ));
    let book_from_waitlist = Arc::new(CreateBookingFromWaitlistHandler::new(
        waitlist_repository,
        create_booking.clone(),
    ));

    let booking_handlers = BookingHandlers::new(
        create_booking,
        cancel_booking,
        process_bookings,
        send_reminders,
        booking_details,
        list_bookings,
        ServiceAuth::new(config.auth.service_token.clone()),
        config.scheduler.reminder_days_before,
    );
    let waitlist_handlers = WaitlistHandlers::new(create_waitlist, book_from_waitlist);

    let app = Router::new()
        .nest("/api/bookings", booking_routes(booking_handlers))
        .nest("/api/waitlist", waitlist_routes(waitlist_handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors_layer(&config));

    let addr = config.server.socket_addr()?;
    info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

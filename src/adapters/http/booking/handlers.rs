//! HTTP handlers for booking endpoints.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::errors::{booking_error_response, ErrorResponse};
use crate::adapters::http::middleware::{AuthenticatedUser, ServiceAuth, ServicePrincipal};
use crate::application::handlers::booking::{
    CancelBookingCommand, CancelBookingHandler, ConfirmNotifyBookingsCommand,
    ConfirmNotifyBookingsHandler, CreateBookingCommand, CreateBookingHandler,
    GetBookingDetailsHandler, GetBookingDetailsQuery, ListBookingsHandler, ListBookingsQuery,
    ListPendingBookingsQuery, ProcessBookingsCommand, ProcessBookingsHandler,
};
use crate::domain::foundation::BookingId;

use super::dto::{
    BookingDetailsResponse, BookingListResponse, BookingResponse, CreateBookingRequest,
    ListBookingsParams, PendingBookingsParams, ProcessBookingsRequest, ProcessBookingsResponse,
    SendRemindersRequest, SendRemindersResponse,
};

/// Router state for the booking endpoints.
#[derive(Clone)]
pub struct BookingHandlers {
    create_handler: Arc<CreateBookingHandler>,
    cancel_handler: Arc<CancelBookingHandler>,
    process_handler: Arc<ProcessBookingsHandler>,
    reminder_handler: Arc<ConfirmNotifyBookingsHandler>,
    details_handler: Arc<GetBookingDetailsHandler>,
    list_handler: Arc<ListBookingsHandler>,
    service_auth: ServiceAuth,
    default_reminder_days: u32,
}

impl BookingHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateBookingHandler>,
        cancel_handler: Arc<CancelBookingHandler>,
        process_handler: Arc<ProcessBookingsHandler>,
        reminder_handler: Arc<ConfirmNotifyBookingsHandler>,
        details_handler: Arc<GetBookingDetailsHandler>,
        list_handler: Arc<ListBookingsHandler>,
        service_auth: ServiceAuth,
        default_reminder_days: u32,
    ) -> Self {
        Self {
            create_handler,
            cancel_handler,
            process_handler,
            reminder_handler,
            details_handler,
            list_handler,
            service_auth,
            default_reminder_days,
        }
    }
}

impl FromRef<BookingHandlers> for ServiceAuth {
    fn from_ref(state: &BookingHandlers) -> Self {
        state.service_auth.clone()
    }
}

/// POST /api/bookings - Create a booking
pub async fn create_booking(
    State(handlers): State<BookingHandlers>,
    user: AuthenticatedUser,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let cmd = CreateBookingCommand {
        queue_id: req.queue_id,
        date: req.date,
        channel: req.channel,
        user: req.user,
        client_id: req.client_id,
        block: req.block,
        explicit_status: req.status,
        services_id: req.services_id,
        services_details: req.services_details,
        telemedicine: req.telemedicine,
        session_id: req.session_id,
        acting_user: user.id,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(booking) => (
            StatusCode::CREATED,
            Json(BookingResponse::from(booking)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// GET /api/bookings/:id - Fetch one booking
pub async fn get_booking(
    State(handlers): State<BookingHandlers>,
    _user: AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Response {
    let Ok(booking_id) = booking_id.parse::<BookingId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid booking ID")),
        )
            .into_response();
    };

    let query = GetBookingDetailsQuery { booking_id };
    match handlers.details_handler.handle(query).await {
        Ok(view) => (
            StatusCode::OK,
            Json(BookingResponse::from(view.booking)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// GET /api/bookings/:id/details - Booking with queue-day context
pub async fn get_booking_details(
    State(handlers): State<BookingHandlers>,
    _user: AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Response {
    let Ok(booking_id) = booking_id.parse::<BookingId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid booking ID")),
        )
            .into_response();
    };

    let query = GetBookingDetailsQuery { booking_id };
    match handlers.details_handler.handle(query).await {
        Ok(view) => (
            StatusCode::OK,
            Json(BookingDetailsResponse::from(view)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// GET /api/bookings - List a queue-day
pub async fn list_bookings(
    State(handlers): State<BookingHandlers>,
    _user: AuthenticatedUser,
    Query(params): Query<ListBookingsParams>,
) -> Response {
    let query = ListBookingsQuery {
        queue_id: params.queue_id,
        date: params.date,
    };

    match handlers.list_handler.by_queue_and_date(query).await {
        Ok(bookings) => (
            StatusCode::OK,
            Json(BookingListResponse::from(bookings)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// GET /api/bookings/pending - Pending bookings in a date range
pub async fn list_pending_bookings(
    State(handlers): State<BookingHandlers>,
    _user: AuthenticatedUser,
    Query(params): Query<PendingBookingsParams>,
) -> Response {
    let query = ListPendingBookingsQuery {
        from: params.from,
        to: params.to,
    };

    match handlers.list_handler.pending_between(query).await {
        Ok(bookings) => (
            StatusCode::OK,
            Json(BookingListResponse::from(bookings)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// POST /api/bookings/:id/cancel - Cancel a booking
pub async fn cancel_booking(
    State(handlers): State<BookingHandlers>,
    user: AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Response {
    let Ok(booking_id) = booking_id.parse::<BookingId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid booking ID")),
        )
            .into_response();
    };

    let cmd = CancelBookingCommand {
        booking_id,
        acting_user: user.id,
    };

    match handlers.cancel_handler.handle(cmd).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(BookingResponse::from(booking)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// POST /api/bookings/process - Closeout batch for one date (service auth)
pub async fn process_bookings(
    State(handlers): State<BookingHandlers>,
    _principal: ServicePrincipal,
    Json(req): Json<ProcessBookingsRequest>,
) -> Response {
    let cmd = ProcessBookingsCommand { date: req.date };

    match handlers.process_handler.handle(cmd).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ProcessBookingsResponse::from(summary)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

/// POST /api/bookings/reminders - Reminder batch (service auth)
pub async fn send_reminders(
    State(handlers): State<BookingHandlers>,
    _principal: ServicePrincipal,
    Json(req): Json<SendRemindersRequest>,
) -> Response {
    let cmd = ConfirmNotifyBookingsCommand {
        days_before: req.days_before.unwrap_or(handlers.default_reminder_days),
    };

    match handlers.reminder_handler.handle(cmd).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(SendRemindersResponse::from(summary)),
        )
            .into_response(),
        Err(e) => booking_error_response(e),
    }
}

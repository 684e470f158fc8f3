//! HTTP handlers for waitlist endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::booking::dto::BookingResponse;
use crate::adapters::http::errors::{waitlist_error_response, ErrorResponse};
use crate::adapters::http::middleware::AuthenticatedUser;
use crate::application::handlers::waitlist::{
    CreateBookingFromWaitlistCommand, CreateBookingFromWaitlistHandler, CreateWaitlistCommand,
    CreateWaitlistHandler,
};
use crate::domain::foundation::WaitlistEntryId;

use super::dto::{BookFromWaitlistRequest, CreateWaitlistRequest, WaitlistEntryResponse};

/// Router state for the waitlist endpoints.
#[derive(Clone)]
pub struct WaitlistHandlers {
    create_handler: Arc<CreateWaitlistHandler>,
    book_handler: Arc<CreateBookingFromWaitlistHandler>,
}

impl WaitlistHandlers {
    pub fn new(
        create_handler: Arc<CreateWaitlistHandler>,
        book_handler: Arc<CreateBookingFromWaitlistHandler>,
    ) -> Self {
        Self {
            create_handler,
            book_handler,
        }
    }
}

/// POST /api/waitlist - Join a waitlist
pub async fn create_waitlist_entry(
    State(handlers): State<WaitlistHandlers>,
    _user: AuthenticatedUser,
    Json(req): Json<CreateWaitlistRequest>,
) -> Response {
    let cmd = CreateWaitlistCommand {
        queue_id: req.queue_id,
        date: req.date,
        channel: req.channel,
        user: req.user,
        client_id: req.client_id,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(WaitlistEntryResponse::from(entry)),
        )
            .into_response(),
        Err(e) => waitlist_error_response(e),
    }
}

/// POST /api/waitlist/:id/book - Claim a freed slot
pub async fn book_from_waitlist(
    State(handlers): State<WaitlistHandlers>,
    user: AuthenticatedUser,
    Path(entry_id): Path<String>,
    Json(req): Json<BookFromWaitlistRequest>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<WaitlistEntryId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid waitlist entry ID")),
        )
            .into_response();
    };

    let cmd = CreateBookingFromWaitlistCommand {
        entry_id,
        block: req.block,
        explicit_status: req.status,
        services_id: req.services_id,
        services_details: req.services_details,
        telemedicine: req.telemedicine,
        acting_user: user.id,
    };

    match handlers.book_handler.handle(cmd).await {
        Ok(booking) => (
            StatusCode::CREATED,
            Json(BookingResponse::from(booking)),
        )
            .into_response(),
        Err(e) => waitlist_error_response(e),
    }
}

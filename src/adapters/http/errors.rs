//! Shared HTTP error payloads and domain-error to status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::booking::BookingError;
use crate::domain::waitlist::WaitlistError;

/// Standard error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Maps a booking error to its HTTP response.
pub fn booking_error_response(error: BookingError) -> Response {
    match error {
        BookingError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Booking", &id.to_string())),
        )
            .into_response(),
        BookingError::QueueNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Queue", &id.to_string())),
        )
            .into_response(),
        BookingError::CommerceNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Commerce", &id)),
        )
            .into_response(),
        BookingError::ClientNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Client", &id)),
        )
            .into_response(),
        BookingError::CapacityExceeded {
            queue_id,
            date,
            limit,
        } => (
            StatusCode::CONFLICT,
            Json(
                ErrorResponse::conflict(format!(
                    "Queue {} is full on {} (limit {})",
                    queue_id, date, limit
                ))
                .with_details(serde_json::json!({ "limit": limit })),
            ),
        )
            .into_response(),
        BookingError::SlotTaken {
            queue_id,
            date,
            block_number,
        } => (
            StatusCode::CONFLICT,
            Json(
                ErrorResponse::conflict(format!(
                    "Block {} on queue {} is already taken for {}",
                    block_number, queue_id, date
                ))
                .with_details(serde_json::json!({ "block_number": block_number })),
            ),
        )
            .into_response(),
        BookingError::TermsNotAccepted => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Terms and conditions must be accepted to book",
            )),
        )
            .into_response(),
        BookingError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        BookingError::InvalidState { current, attempted } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Cannot {} a booking in state {}",
                attempted, current
            ))),
        )
            .into_response(),
        BookingError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

/// Maps a waitlist error to its HTTP response.
pub fn waitlist_error_response(error: WaitlistError) -> Response {
    match error {
        WaitlistError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Waitlist entry", &id.to_string())),
        )
            .into_response(),
        WaitlistError::QueueNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Queue", &id.to_string())),
        )
            .into_response(),
        WaitlistError::CommerceNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Commerce", &id)),
        )
            .into_response(),
        WaitlistError::ClientNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Client", &id)),
        )
            .into_response(),
        WaitlistError::AlreadyPromoted(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Waitlist entry {} was already promoted",
                id
            ))),
        )
            .into_response(),
        WaitlistError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        WaitlistError::Booking(e) => booking_error_response(e),
        WaitlistError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BookingId;

    #[test]
    fn not_found_maps_to_404() {
        let response = booking_error_response(BookingError::NotFound(BookingId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn terms_map_to_400() {
        let response = booking_error_response(BookingError::TermsNotAccepted);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wrapped_booking_error_keeps_its_status() {
        let response =
            waitlist_error_response(WaitlistError::Booking(BookingError::TermsNotAccepted));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

//! Waitlist-specific error types.

use crate::domain::booking::BookingError;
use crate::domain::foundation::{DomainError, ErrorCode, QueueId, WaitlistEntryId};

/// Waitlist-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitlistError {
    /// Entry was not found.
    NotFound(WaitlistEntryId),

    /// Queue referenced by the request does not exist.
    QueueNotFound(QueueId),

    /// Commerce referenced by the queue does not exist.
    CommerceNotFound(String),

    /// Client id given but no such client.
    ClientNotFound(String),

    /// The entry was already promoted into a booking.
    AlreadyPromoted(WaitlistEntryId),

    /// Validation failed.
    Validation { field: String, message: String },

    /// Claiming the slot failed inside the booking flow.
    Booking(BookingError),

    /// Infrastructure error.
    Infrastructure(String),
}

impl WaitlistError {
    pub fn not_found(id: WaitlistEntryId) -> Self {
        WaitlistError::NotFound(id)
    }

    pub fn already_promoted(id: WaitlistEntryId) -> Self {
        WaitlistError::AlreadyPromoted(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WaitlistError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitlistError::NotFound(id) => write!(f, "Waitlist entry {} not found", id),
            WaitlistError::QueueNotFound(id) => write!(f, "Queue {} not found", id),
            WaitlistError::CommerceNotFound(id) => write!(f, "Commerce {} not found", id),
            WaitlistError::ClientNotFound(id) => write!(f, "Client {} not found", id),
            WaitlistError::AlreadyPromoted(id) => {
                write!(f, "Waitlist entry {} was already promoted", id)
            }
            WaitlistError::Validation { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            WaitlistError::Booking(err) => write!(f, "Booking failed: {}", err),
            WaitlistError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for WaitlistError {}

impl From<DomainError> for WaitlistError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::NestedStructure => {
                WaitlistError::Validation {
                    field: err.details.get("field").cloned().unwrap_or_default(),
                    message: err.message,
                }
            }
            ErrorCode::AlreadyProcessed => {
                match err.details.get("entry_id").and_then(|id| id.parse().ok()) {
                    Some(entry_id) => WaitlistError::AlreadyPromoted(entry_id),
                    None => WaitlistError::Infrastructure(err.to_string()),
                }
            }
            _ => WaitlistError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BookingError> for WaitlistError {
    fn from(err: BookingError) -> Self {
        WaitlistError::Booking(err)
    }
}

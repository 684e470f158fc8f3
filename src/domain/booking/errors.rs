//! Booking-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / QueueNotFound / ClientNotFound | 404 |
//! | CapacityExceeded | 409 |
//! | SlotTaken | 409 |
//! | TermsNotAccepted / Validation | 400 |
//! | InvalidState | 409 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{BookingId, DayDate, DomainError, ErrorCode, QueueId};

/// Booking-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found.
    NotFound(BookingId),

    /// Queue referenced by the request does not exist.
    QueueNotFound(QueueId),

    /// Commerce referenced by the queue does not exist.
    CommerceNotFound(String),

    /// Client id given but no such client.
    ClientNotFound(String),

    /// The day already holds the queue's daily limit of bookings.
    CapacityExceeded {
        queue_id: QueueId,
        date: DayDate,
        limit: u32,
    },

    /// A requested block is already held for that queue and day.
    SlotTaken {
        queue_id: QueueId,
        date: DayDate,
        block_number: u32,
    },

    /// The requester did not accept the terms and conditions.
    TermsNotAccepted,

    /// Validation failed.
    Validation { field: String, message: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn queue_not_found(id: QueueId) -> Self {
        BookingError::QueueNotFound(id)
    }

    pub fn capacity_exceeded(queue_id: QueueId, date: DayDate, limit: u32) -> Self {
        BookingError::CapacityExceeded {
            queue_id,
            date,
            limit,
        }
    }

    pub fn slot_taken(queue_id: QueueId, date: DayDate, block_number: u32) -> Self {
        BookingError::SlotTaken {
            queue_id,
            date,
            block_number,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BookingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::NotFound(id) => write!(f, "Booking {} not found", id),
            BookingError::QueueNotFound(id) => write!(f, "Queue {} not found", id),
            BookingError::CommerceNotFound(id) => write!(f, "Commerce {} not found", id),
            BookingError::ClientNotFound(id) => write!(f, "Client {} not found", id),
            BookingError::CapacityExceeded {
                queue_id,
                date,
                limit,
            } => write!(
                f,
                "Queue {} reached its daily limit of {} bookings for {}",
                queue_id, limit, date
            ),
            BookingError::SlotTaken {
                queue_id,
                date,
                block_number,
            } => write!(
                f,
                "Block {} of queue {} on {} is already taken",
                block_number, queue_id, date
            ),
            BookingError::TermsNotAccepted => {
                write!(f, "Terms and conditions must be accepted to book")
            }
            BookingError::Validation { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            BookingError::InvalidState { current, attempted } => {
                write!(f, "Cannot {} a booking in state {}", attempted, current)
            }
            BookingError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::TermsNotAccepted => BookingError::TermsNotAccepted,
            ErrorCode::ValidationFailed | ErrorCode::NestedStructure => BookingError::Validation {
                field: err
                    .details
                    .get("field")
                    .or_else(|| err.details.get("path"))
                    .cloned()
                    .unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => BookingError::InvalidState {
                current: err.details.get("booking_id").cloned().unwrap_or_default(),
                attempted: err.message,
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

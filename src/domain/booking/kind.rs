//! Booking kind: standard in-person attention or a telemedicine session.
//!
//! A closed tagged variant so that every defaulting/validation site handles
//! both kinds exhaustively.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Telemedicine session settings carried by a telemedicine booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemedicineConfig {
    /// When the remote session takes place. Must be strictly in the future
    /// at booking-creation time.
    pub scheduled_at: Timestamp,

    /// Whether the session is recorded. Always resolved from the commerce
    /// configuration, never from caller input.
    pub recording_enabled: bool,
}

/// Caller-side telemedicine input; `recording_enabled` is intentionally
/// absent because the commerce configuration is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemedicineRequest {
    pub scheduled_at: Timestamp,
}

/// Closed set of booking kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    Standard,
    Telemedicine { config: TelemedicineConfig },
}

impl BookingKind {
    /// Validates a telemedicine request against the creation clock and the
    /// commerce recording setting, producing the stored kind.
    pub fn telemedicine(
        request: &TelemedicineRequest,
        now: Timestamp,
        commerce_recording_enabled: bool,
    ) -> Result<Self, DomainError> {
        if !request.scheduled_at.is_after(&now) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Telemedicine session must be scheduled in the future, got {}",
                    request.scheduled_at
                ),
            )
            .with_detail("scheduled_at", request.scheduled_at.to_string()));
        }
        Ok(BookingKind::Telemedicine {
            config: TelemedicineConfig {
                scheduled_at: request.scheduled_at,
                recording_enabled: commerce_recording_enabled,
            },
        })
    }

    pub fn is_telemedicine(&self) -> bool {
        matches!(self, BookingKind::Telemedicine { .. })
    }
}

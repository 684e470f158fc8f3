//! Commerce (tenant) read model and feature toggles.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CommerceId;

/// Feature toggle attached to a commerce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub active: bool,
}

/// Toggle that switches new bookings to the confirmation flow: bookings
/// default to Pending and must be confirmed before the day closes.
pub const FEATURE_BOOKING_CONFIRM: &str = "booking-confirm";

/// Locale info used when composing notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub timezone: String,
}

/// Commerce read model, owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commerce {
    pub id: CommerceId,
    pub name: String,
    pub features: Vec<Feature>,
    pub locale_info: LocaleInfo,

    /// Whether telemedicine sessions for this commerce are recorded.
    /// Authoritative source for `TelemedicineConfig::recording_enabled`.
    pub telemedicine_recording_enabled: bool,
}

impl Commerce {
    /// Checks whether a named feature toggle is active for this commerce.
    pub fn feature_active(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name && f.active)
    }
}

//! Service read model and per-booking service details.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ServiceId;

/// Bookable service configuration, owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,

    /// Configured number of sessions this service takes.
    pub procedures: Option<u32>,

    /// Legacy comma-separated session-count options ("3,5,10"); the first
    /// value is the default when `procedures` is unset.
    pub procedures_list: Option<String>,

    /// How many consecutive blocks one session of this service spans.
    pub blocks_needed: Option<u32>,
}

impl Service {
    /// Resolves the configured session count, preferring the explicit value
    /// over the first entry of the legacy list.
    pub fn configured_procedures(&self) -> Option<u32> {
        if self.procedures.is_some() {
            return self.procedures;
        }
        self.procedures_list
            .as_deref()
            .and_then(|list| list.split(',').next())
            .and_then(|first| first.trim().parse().ok())
    }
}

/// Per-booking detail for a selected service.
///
/// Callers may override the session count for a specific booking; the
/// override takes priority over the service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub service_id: ServiceId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Per-booking session count override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedures: Option<u32>,
}

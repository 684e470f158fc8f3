//! HTTP DTOs for waitlist endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{BookingStatus, TelemedicineRequest};
use crate::domain::catalog::{BlockSelection, ServiceDetail, UserSnapshot};
use crate::domain::foundation::{ClientId, DayDate, QueueId, ServiceId};
use crate::domain::waitlist::{WaitlistEntry, WaitlistStatus};

/// Request to join a waitlist.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWaitlistRequest {
    pub queue_id: QueueId,
    pub date: DayDate,
    pub channel: String,
    pub user: UserSnapshot,
    #[serde(default)]
    pub client_id: Option<ClientId>,
}

/// Request to claim a freed slot from a waitlist entry.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BookFromWaitlistRequest {
    #[serde(default)]
    pub block: Option<BlockSelection>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub services_id: Vec<ServiceId>,
    #[serde(default)]
    pub services_details: Vec<ServiceDetail>,
    #[serde(default)]
    pub telemedicine: Option<TelemedicineRequest>,
}

/// Waitlist entry as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistEntryResponse {
    pub id: String,
    pub queue_id: String,
    pub commerce_id: String,
    pub date: String,
    pub channel: String,
    pub user: UserSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub status: WaitlistStatus,
    pub processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    pub created_at: String,
}

impl From<WaitlistEntry> for WaitlistEntryResponse {
    fn from(entry: WaitlistEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            queue_id: entry.queue_id.to_string(),
            commerce_id: entry.commerce_id.to_string(),
            date: entry.date.to_string(),
            channel: entry.channel,
            user: entry.user,
            client_id: entry.client_id.map(|c| c.to_string()),
            status: entry.status,
            processed: entry.processed,
            booking_id: entry.booking_id.map(|b| b.to_string()),
            created_at: entry.created_at.to_string(),
        }
    }
}

//! HTTP DTOs for booking endpoints.
//!
//! Value objects that are stored verbatim on the aggregate (contact
//! snapshot, block selection, service details) cross the API boundary
//! unchanged; identifiers are rendered as strings on the way out.

use serde::{Deserialize, Serialize};

use crate::application::handlers::booking::{
    BookingDetailsView, ProcessBookingsSummary, ReminderSummary,
};
use crate::domain::booking::{Booking, BookingKind, BookingStatus, TelemedicineRequest};
use crate::domain::catalog::{BlockSelection, ServiceDetail, UserSnapshot};
use crate::domain::foundation::{ClientId, DayDate, QueueId, ServiceId, SessionKey};

// Request DTOs

/// Request to create a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub queue_id: QueueId,
    pub date: DayDate,
    pub channel: String,
    pub user: UserSnapshot,
    #[serde(default)]
    pub client_id: Option<ClientId>,
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
    #[serde(default)]
    pub session_id: Option<SessionKey>,
}

/// Query parameters for listing a queue-day.
#[derive(Debug, Clone, Deserialize)]
pub struct ListBookingsParams {
    pub queue_id: QueueId,
    pub date: DayDate,
}

/// Query parameters for the pending-range listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingBookingsParams {
    pub from: DayDate,
    pub to: DayDate,
}

/// Request to run the closeout batch for one date.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessBookingsRequest {
    pub date: DayDate,
}

/// Request to run the reminder batch.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SendRemindersRequest {
    /// Overrides the configured reminder window when given.
    #[serde(default)]
    pub days_before: Option<u32>,
}

// Response DTOs

/// Booking as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub queue_id: String,
    pub commerce_id: String,
    pub date: String,
    pub number: u32,
    pub status: BookingStatus,
    pub channel: String,
    pub user: UserSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockSelection>,
    pub services_id: Vec<String>,
    pub services_details: Vec<ServiceDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    pub kind: BookingKind,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    pub confirm_notified: bool,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            queue_id: booking.queue_id.to_string(),
            commerce_id: booking.commerce_id.to_string(),
            date: booking.date.to_string(),
            number: booking.number,
            status: booking.status,
            channel: booking.channel,
            user: booking.user,
            client_id: booking.client_id.map(|c| c.to_string()),
            block: booking.block,
            services_id: booking.services_id.iter().map(|s| s.to_string()).collect(),
            services_details: booking.services_details,
            package_id: booking.package_id.map(|p| p.to_string()),
            kind: booking.kind,
            cancelled: booking.cancelled,
            cancelled_at: booking.cancelled_at.map(|t| t.to_string()),
            confirm_notified: booking.confirm_notified,
            created_at: booking.created_at.to_string(),
        }
    }
}

/// List envelope.
#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
    pub total: usize,
}

impl From<Vec<Booking>> for BookingListResponse {
    fn from(bookings: Vec<Booking>) -> Self {
        let bookings: Vec<BookingResponse> =
            bookings.into_iter().map(BookingResponse::from).collect();
        let total = bookings.len();
        Self { bookings, total }
    }
}

/// Booking with its queue-day context.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetailsResponse {
    pub booking: BookingResponse,
    pub queue_name: String,
    pub commerce_name: String,
    pub bookings_ahead: u32,
}

impl From<BookingDetailsView> for BookingDetailsResponse {
    fn from(view: BookingDetailsView) -> Self {
        Self {
            booking: view.booking.into(),
            queue_name: view.queue_name,
            commerce_name: view.commerce_name,
            bookings_ahead: view.bookings_ahead,
        }
    }
}

/// Closeout batch outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessBookingsResponse {
    pub expired: u32,
    pub confirmed: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl From<ProcessBookingsSummary> for ProcessBookingsResponse {
    fn from(summary: ProcessBookingsSummary) -> Self {
        Self {
            expired: summary.expired,
            confirmed: summary.confirmed,
            skipped: summary.skipped,
            failed: summary.failed,
        }
    }
}

/// Reminder batch outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SendRemindersResponse {
    pub sent: u32,
    pub failed: u32,
}

impl From<ReminderSummary> for SendRemindersResponse {
    fn from(summary: ReminderSummary) -> Self {
        Self {
            sent: summary.sent,
            failed: summary.failed,
        }
    }
}

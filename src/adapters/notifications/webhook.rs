//! Webhook notification dispatcher.
//!
//! Posts each notification as JSON to the delivery service configured in
//! `notifications.webhook_url`. Delivery failures become transient dependency
//! errors; callers treat them as fire-and-forget.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::config::NotificationsConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{BookingNotification, NotificationDispatcher, WaitlistSlotOpen};

/// [`NotificationDispatcher`] backed by an external delivery webhook.
pub struct WebhookNotificationDispatcher {
    config: NotificationsConfig,
    http_client: reqwest::Client,
}

impl WebhookNotificationDispatcher {
    pub fn new(config: NotificationsConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                DomainError::transient("notifications", format!("HTTP client init failed: {}", e))
            })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<(), DomainError> {
        let url = format!("{}/{}", self.config.webhook_url.trim_end_matches('/'), path);
        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "Notification webhook unreachable");
                DomainError::transient("notifications", e.to_string())
            })?;

        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "Notification webhook rejected payload");
            return Err(DomainError::transient(
                "notifications",
                format!("Webhook returned {}", response.status()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookNotificationDispatcher {
    async fn send_booking_created(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        self.post("bookings/created", notification).await
    }

    async fn send_booking_cancelled(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        self.post("bookings/cancelled", notification).await
    }

    async fn send_booking_reminder(
        &self,
        notification: &BookingNotification,
    ) -> Result<(), DomainError> {
        self.post("bookings/reminder", notification).await
    }

    async fn send_waitlist_slot_open(
        &self,
        notification: &WaitlistSlotOpen,
    ) -> Result<(), DomainError> {
        self.post("waitlist/slot-open", notification).await
    }
}

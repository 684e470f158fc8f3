//! Notification delivery configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Outbound notification settings
///
/// When `webhook_url` is empty the service falls back to the logging
/// dispatcher, which is the default for local development.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Base URL of the downstream notification webhook
    #[serde(default)]
    pub webhook_url: String,

    /// Base URL embedded in waitlist claim links sent to clients
    #[serde(default = "default_claim_base_url")]
    pub claim_base_url: String,
}

impl NotificationsConfig {
    /// Whether webhook delivery is configured
    pub fn webhook_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.webhook_url.is_empty() && !is_http_url(&self.webhook_url) {
            return Err(ValidationError::InvalidWebhookUrl);
        }
        if !is_http_url(&self.claim_base_url) {
            return Err(ValidationError::InvalidClaimBaseUrl);
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            claim_base_url: default_claim_base_url(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_claim_base_url() -> String {
    "http://localhost:8080".to_string()
}

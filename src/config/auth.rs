//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication settings
///
/// The service token gates the batch endpoints (closeout, reminders) that
/// are meant to be hit by the scheduler, not by end users.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Shared token presented by the batch scheduler
    #[serde(default)]
    pub service_token: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.service_token {
            Some(token) if token.is_empty() => {
                Err(ValidationError::MissingRequired("AUTH_SERVICE_TOKEN"))
            }
            None if *environment == Environment::Production => {
                Err(ValidationError::MissingRequired("AUTH_SERVICE_TOKEN"))
            }
            _ => Ok(()),
        }
    }
}

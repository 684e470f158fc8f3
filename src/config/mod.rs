//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `SLOTLINE_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use slotline::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod features;
mod notifications;
mod scheduler;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use notifications::NotificationsConfig;
pub use scheduler::SchedulerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (service token)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Batch scheduler tunables (closeout hour, reminder window)
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Outbound notification settings (webhook, claim links)
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first when present, then environment variables
    /// with the `SLOTLINE` prefix, e.g. `SLOTLINE__DATABASE__URL`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SLOTLINE")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.scheduler.validate()?;
        self.notifications.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global, so these tests must not interleave.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "SLOTLINE__DATABASE__URL",
            "postgresql://test@localhost/slotline_test",
        );
    }

    fn clear_env() {
        env::remove_var("SLOTLINE__DATABASE__URL");
        env::remove_var("SLOTLINE__SERVER__PORT");
        env::remove_var("SLOTLINE__SCHEDULER__REMINDER_DAYS_BEFORE");
        env::remove_var("SLOTLINE__NOTIFICATIONS__WEBHOOK_URL");
        env::remove_var("SLOTLINE__AUTH__SERVICE_TOKEN");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/slotline_test");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SLOTLINE__SERVER__PORT", "3001");
        env::set_var("SLOTLINE__SCHEDULER__REMINDER_DAYS_BEFORE", "3");
        env::set_var(
            "SLOTLINE__NOTIFICATIONS__WEBHOOK_URL",
            "https://hooks.example.com/slotline",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.scheduler.reminder_days_before, 3);
        assert!(config.notifications.webhook_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_database_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();
        assert!(result.is_err());
    }
}

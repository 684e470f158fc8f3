//! Notification dispatcher adapters.

mod logging;
mod webhook;

pub use logging::LoggingNotificationDispatcher;
pub use webhook::WebhookNotificationDispatcher;

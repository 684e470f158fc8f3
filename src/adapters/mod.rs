//! Adapters - concrete implementations of the ports.
//!
//! - `postgres/` - sqlx-backed persistence
//! - `memory/` - in-memory stores for tests and local runs
//! - `events/` - in-process event bus
//! - `notifications/` - logging and webhook dispatchers
//! - `http/` - axum routes, handlers and DTOs

pub mod events;
pub mod http;
pub mod memory;
pub mod notifications;
pub mod postgres;

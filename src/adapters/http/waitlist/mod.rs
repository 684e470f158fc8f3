//! Waitlist HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::WaitlistHandlers;
pub use routes::waitlist_routes;

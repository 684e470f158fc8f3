//! HTTP adapters - REST API implementations.

pub mod booking;
pub mod errors;
pub mod middleware;
pub mod waitlist;

pub use booking::{booking_routes, BookingHandlers};
pub use waitlist::{waitlist_routes, WaitlistHandlers};

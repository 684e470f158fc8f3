//! Application layer: the booking factory and the handlers orchestrating
//! domain logic across ports.

pub mod booking_factory;
pub mod handlers;

pub use booking_factory::{BookingDraft, BookingFactory};

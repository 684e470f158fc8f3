//! Waitlist command handlers.

mod create_booking_from_waitlist;
mod create_waitlist;
mod promote_waitlist;

pub use create_booking_from_waitlist::{
    CreateBookingFromWaitlistCommand, CreateBookingFromWaitlistHandler,
};
pub use create_waitlist::{CreateWaitlistCommand, CreateWaitlistHandler};
pub use promote_waitlist::{PromoteWaitlistHandler, PromotionSummary};

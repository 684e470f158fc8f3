//! Command and query handlers, grouped by aggregate.

pub mod booking;
pub mod waitlist;

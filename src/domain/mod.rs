//! Domain layer: aggregates, value objects, events, and invariants.

pub mod booking;
pub mod catalog;
pub mod foundation;
pub mod package;
pub mod waitlist;

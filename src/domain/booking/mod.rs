//! Booking aggregate, status machine, ledger records, and events.

mod aggregate;
mod errors;
mod events;
mod kind;
mod status;
mod taken_block;

pub use aggregate::Booking;
pub use errors::BookingError;
pub use events::{BookingCancelled, BookingCreated};
pub use kind::{BookingKind, TelemedicineConfig, TelemedicineRequest};
pub use status::BookingStatus;
pub use taken_block::TakenBlockRecord;

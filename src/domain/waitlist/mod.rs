//! Waitlist entries and their lifecycle.

mod entry;
mod errors;
mod status;

pub use entry::WaitlistEntry;
pub use errors::WaitlistError;
pub use status::WaitlistStatus;

//! In-process adapter implementations of the owned ports.
//!
//! Used by the integration tests and by local runs without external
//! dependencies.

mod booking_repository;
mod directory;
mod package_tracker;
mod taken_block_ledger;
mod waitlist_repository;

pub use booking_repository::InMemoryBookingRepository;
pub use directory::InMemoryDirectory;
pub use package_tracker::InMemoryPackageTracker;
pub use taken_block_ledger::InMemoryTakenBlockLedger;
pub use waitlist_repository::InMemoryWaitlistRepository;

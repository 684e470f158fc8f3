//! Ports: trait boundaries between the application core and the outside.
//!
//! Adapters implement these; handlers depend on them through `Arc<dyn _>`.

mod booking_repository;
mod client_provider;
mod commerce_provider;
mod event_publisher;
mod event_subscriber;
mod notification_dispatcher;
mod package_tracker;
mod queue_provider;
mod service_provider;
mod taken_block_ledger;
mod waitlist_repository;

pub use booking_repository::BookingRepository;
pub use client_provider::ClientProvider;
pub use commerce_provider::CommerceProvider;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use notification_dispatcher::{
    BookingNotification, NotificationDispatcher, WaitlistSlotOpen,
};
pub use package_tracker::{NewPackage, PackageTracker};
pub use queue_provider::QueueProvider;
pub use service_provider::ServiceProvider;
pub use taken_block_ledger::TakenBlockLedger;
pub use waitlist_repository::WaitlistRepository;

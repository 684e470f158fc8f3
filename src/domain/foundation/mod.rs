//! Foundation value objects and infrastructure shared across the domain.

mod document;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use document::ensure_flat;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{
    BookingId, ClientId, CommerceId, PackageId, QueueId, ServiceId, SessionKey, UserId,
    WaitlistEntryId,
};
pub use state_machine::StateMachine;
pub use timestamp::{DayDate, Timestamp};

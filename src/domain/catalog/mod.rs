//! Read models for external collaborators: queues, commerces, services,
//! clients. These entities are owned elsewhere; this core only reads them.

mod block;
mod client;
mod commerce;
mod queue;
mod service;

pub use block::{Block, BlockSelection};
pub use client::{Client, UserSnapshot};
pub use commerce::{Commerce, Feature, LocaleInfo, FEATURE_BOOKING_CONFIRM};
pub use queue::Queue;
pub use service::{Service, ServiceDetail};

//! Client directory port.
//!
//! Unlike the other directory ports this one is read-write: waitlist intake
//! may capture fresher contact details than the directory holds, and those
//! are written back.

use async_trait::async_trait;

use crate::domain::catalog::Client;
use crate::domain::foundation::{ClientId, DomainError};

/// Access to client records.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Find a client by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Persist updated contact details for an existing client.
    async fn save(&self, client: &Client) -> Result<(), DomainError>;
}

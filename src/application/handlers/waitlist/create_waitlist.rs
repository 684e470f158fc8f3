//! CreateWaitlistHandler - registers interest in a fully booked queue-day.

use std::sync::Arc;

use tracing::warn;

use crate::domain::catalog::UserSnapshot;
use crate::domain::foundation::{ClientId, DayDate, QueueId};
use crate::domain::waitlist::{WaitlistEntry, WaitlistError};
use crate::ports::{ClientProvider, CommerceProvider, QueueProvider, WaitlistRepository};

/// Command to create a waitlist entry.
#[derive(Debug, Clone)]
pub struct CreateWaitlistCommand {
    pub queue_id: QueueId,
    pub date: DayDate,
    pub channel: String,
    pub user: UserSnapshot,
    pub client_id: Option<ClientId>,
}

/// Handler for waitlist intake.
pub struct CreateWaitlistHandler {
    waitlist_repository: Arc<dyn WaitlistRepository>,
    queue_provider: Arc<dyn QueueProvider>,
    commerce_provider: Arc<dyn CommerceProvider>,
    client_provider: Arc<dyn ClientProvider>,
}

impl CreateWaitlistHandler {
    pub fn new(
        waitlist_repository: Arc<dyn WaitlistRepository>,
        queue_provider: Arc<dyn QueueProvider>,
        commerce_provider: Arc<dyn CommerceProvider>,
        client_provider: Arc<dyn ClientProvider>,
    ) -> Self {
        Self {
            waitlist_repository,
            queue_provider,
            commerce_provider,
            client_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateWaitlistCommand,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let queue = self
            .queue_provider
            .find_by_id(&cmd.queue_id)
            .await?
            .ok_or(WaitlistError::QueueNotFound(cmd.queue_id))?;
        if self
            .commerce_provider
            .find_by_id(&queue.commerce_id)
            .await?
            .is_none()
        {
            return Err(WaitlistError::CommerceNotFound(queue.commerce_id.to_string()));
        }

        let user = match cmd.client_id {
            Some(client_id) => self.resolve_client_snapshot(client_id, &cmd.user).await?,
            None => cmd.user.clone(),
        };

        let entry = WaitlistEntry::new(
            cmd.queue_id,
            queue.commerce_id,
            cmd.date,
            cmd.channel,
            user,
            cmd.client_id,
        );
        self.waitlist_repository.save(&entry).await?;
        Ok(entry)
    }

    /// Merges the directory record with the contact details supplied at
    /// intake, writing fresher details back to the directory.
    async fn resolve_client_snapshot(
        &self,
        client_id: ClientId,
        provided: &UserSnapshot,
    ) -> Result<UserSnapshot, WaitlistError> {
        let mut client = self
            .client_provider
            .find_by_id(&client_id)
            .await?
            .ok_or_else(|| WaitlistError::ClientNotFound(client_id.to_string()))?;

        let fresher = provided.email.is_some() || provided.phone.is_some();
        if provided.email.is_some() {
            client.email = provided.email.clone();
        }
        if provided.phone.is_some() {
            client.phone = provided.phone.clone();
        }
        if fresher {
            if let Err(e) = self.client_provider.save(&client).await {
                warn!(%client_id, error = %e, "Client contact write-back failed");
            }
        }

        let mut snapshot = client.snapshot();
        snapshot.accept_terms_and_conditions = provided.accept_terms_and_conditions;
        Ok(snapshot)
    }
}

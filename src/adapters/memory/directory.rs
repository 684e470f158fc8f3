//! In-memory directory of collaborator-owned records.
//!
//! Implements the read-side provider ports from seeded fixtures. Queues,
//! commerces, and services are owned elsewhere in production; here they are
//! plain maps the tests populate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::{Client, Commerce, Queue, Service};
use crate::domain::foundation::{
    ClientId, CommerceId, DomainError, ErrorCode, QueueId, ServiceId,
};
use crate::ports::{ClientProvider, CommerceProvider, QueueProvider, ServiceProvider};

/// Fixture-backed provider for queues, commerces, services, and clients.
#[derive(Default)]
pub struct InMemoryDirectory {
    queues: Mutex<HashMap<QueueId, Queue>>,
    commerces: Mutex<HashMap<CommerceId, Commerce>>,
    services: Mutex<HashMap<ServiceId, Service>>,
    clients: Mutex<HashMap<ClientId, Client>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_queue(&self, queue: Queue) {
        if let Ok(mut map) = self.queues.lock() {
            map.insert(queue.id, queue);
        }
    }

    pub fn insert_commerce(&self, commerce: Commerce) {
        if let Ok(mut map) = self.commerces.lock() {
            map.insert(commerce.id, commerce);
        }
    }

    pub fn insert_service(&self, service: Service) {
        if let Ok(mut map) = self.services.lock() {
            map.insert(service.id, service);
        }
    }

    pub fn insert_client(&self, client: Client) {
        if let Ok(mut map) = self.clients.lock() {
            map.insert(client.id, client);
        }
    }
}

#[async_trait]
impl QueueProvider for InMemoryDirectory {
    async fn find_by_id(&self, id: &QueueId) -> Result<Option<Queue>, DomainError> {
        let map = self
            .queues
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn find_by_commerce(
        &self,
        commerce_id: &CommerceId,
    ) -> Result<Vec<Queue>, DomainError> {
        let map = self
            .queues
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map
            .values()
            .filter(|q| q.commerce_id == *commerce_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommerceProvider for InMemoryDirectory {
    async fn find_by_id(&self, id: &CommerceId) -> Result<Option<Commerce>, DomainError> {
        let map = self
            .commerces
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }
}

#[async_trait]
impl ServiceProvider for InMemoryDirectory {
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, DomainError> {
        let map = self
            .services
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }
}

#[async_trait]
impl ClientProvider for InMemoryDirectory {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let map = self
            .clients
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        let mut map = self
            .clients
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Lock poisoned"))?;
        map.insert(client.id, client.clone());
        Ok(())
    }
}

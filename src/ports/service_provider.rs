//! Service catalog port (read-only).

use async_trait::async_trait;

use crate::domain::catalog::Service;
use crate::domain::foundation::{DomainError, ServiceId};

/// Read-only access to the service catalog.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Find a service by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn ServiceProvider) {}
    }
}

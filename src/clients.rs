use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::{ClientId, TenantId};

// ============================================================================
// Client Directory - Tenant-Scoped Existence Checks
// ============================================================================

#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn exists(&self, tenant: TenantId, client: ClientId) -> bool;
}

/// In-memory directory used by the demo binary and the tests.
#[derive(Default)]
pub struct InMemoryClientDirectory {
    clients: RwLock<HashSet<(TenantId, ClientId)>>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, tenant: TenantId, client: ClientId) {
        let mut clients = self.clients.write().await;
        clients.insert((tenant, client));
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    async fn exists(&self, tenant: TenantId, client: ClientId) -> bool {
        let clients = self.clients.read().await;
        clients.contains(&(tenant, client))
    }
}

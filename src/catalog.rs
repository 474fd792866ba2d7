use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::order::{ProductId, TenantId};

// ============================================================================
// Product Catalog - Price Lookup Collaborator
// ============================================================================
//
// The order engine reads the catalog only to snapshot a unit price at
// add-item time. It never holds a live reference to a product, so later
// catalog edits cannot retroactively change existing order lines.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get(&self, tenant: TenantId, id: ProductId) -> Option<Product>;
}

/// In-memory catalog used by the demo binary and the tests.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<(TenantId, ProductId), Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, tenant: TenantId, product: Product) {
        let mut products = self.products.write().await;
        products.insert((tenant, product.id), product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn get(&self, tenant: TenantId, id: ProductId) -> Option<Product> {
        let products = self.products.read().await;
        products.get(&(tenant, id)).cloned()
    }
}

use std::sync::Arc;

use rust_decimal_macros::dec;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pdv_orders::catalog::{InMemoryCatalog, Product};
use pdv_orders::clients::InMemoryClientDirectory;
use pdv_orders::domain::order::{ClientId, OrderKind, ProductId, TenantId};
use pdv_orders::printing::LogPrinter;
use pdv_orders::store::InMemoryOrderStore;
use pdv_orders::{ItemRequest, OrderService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pdv_orders=debug")),
        )
        .init();

    tracing::info!("starting PDV order engine demo");

    // === 1. Wire the in-memory collaborators ===
    let tenant = TenantId(1);
    let client = ClientId(10);

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog
        .upsert(tenant, Product { id: ProductId(1), name: "picanha burger".into(), price: dec!(25.00) })
        .await;
    catalog
        .upsert(tenant, Product { id: ProductId(2), name: "guaraná 350ml".into(), price: dec!(6.50) })
        .await;
    catalog
        .upsert(tenant, Product { id: ProductId(3), name: "feijoada completa".into(), price: dec!(42.00) })
        .await;

    let clients = Arc::new(InMemoryClientDirectory::new());
    clients.register(tenant, client).await;

    let service = OrderService::new(
        Arc::new(InMemoryOrderStore::new()),
        catalog,
        clients,
        Arc::new(LogPrinter::new()),
    );

    // === 2. Dine-in lifecycle: open, add items, print, close ===
    let order = service
        .create(
            tenant,
            client,
            OrderKind::dine_in(None)?,
            vec![ItemRequest { product_id: ProductId(1), quantity: 2, notes: None }],
            Some("table 4".into()),
        )
        .await?;
    tracing::info!(order_id = %order.id, total = %order.totals.total, "dine-in order opened");

    let order = service
        .add_item(
            tenant,
            order.id,
            ItemRequest {
                product_id: ProductId(2),
                quantity: 2,
                notes: Some("no ice".into()),
            },
        )
        .await?;

    service.print(tenant, order.id).await?;

    let closed = service.close_account(tenant, order.id, Some(dec!(12))).await?;
    tracing::info!(
        order_id = %closed.id,
        subtotal = %closed.totals.subtotal,
        service_charge = %closed.totals.service_charge,
        total = %closed.totals.total,
        "account closed"
    );

    // === 3. Delivery lifecycle: open, advance through the kitchen ===
    let delivery = service
        .create(
            tenant,
            client,
            OrderKind::delivery(Some(dec!(8.00)))?,
            vec![ItemRequest { product_id: ProductId(3), quantity: 1, notes: None }],
            None,
        )
        .await?;
    tracing::info!(order_id = %delivery.id, total = %delivery.totals.total, "delivery order opened");

    for _ in 0..3 {
        let advanced = service.advance(tenant, delivery.id).await?;
        tracing::info!(order_id = %advanced.id, status = ?advanced.status, "kitchen progress");
    }

    // === 4. Today's board ===
    let open = service.list_open(tenant).await?;
    tracing::info!(open_orders = open.len(), "demo complete");

    Ok(())
}

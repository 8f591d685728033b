//! # Storefront Demo
//!
//! Walks one shopper through the core:
//! 1.  Starting the [`Storefront`] (catalog seeded with the demo products).
//! 2.  Searching the catalog.
//! 3.  Filling a cart and checking out.
//! 4.  Changing a price afterwards, which leaves the placed order untouched.
//!
//! Configuration comes from `STOREFRONT_*` environment variables; logging from `RUST_LOG`.

use rust_decimal::Decimal;
use storefront::lifecycle::{setup_tracing, Storefront, StorefrontConfig};
use storefront::model::{PaymentMethod, ProductUpdate};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig {
        seed_catalog: true,
        ..StorefrontConfig::from_env()?
    };
    let store = Storefront::start(config).await?;

    let hits = store.catalog().search("phone").await?;
    for product in &hits {
        info!(id = %product.id, name = %product.name, price = %product.price, "Search hit");
    }

    let cart = store.session("alice");
    let span = tracing::info_span!("shopping", user = "alice");
    let order = async {
        for product in &hits {
            cart.add_item(product.id, 1).await?;
        }
        if let Some(first) = hits.iter().next() {
            cart.add_item(first.id, 1).await?;
        }
        let view = cart.view().await?;
        for line in &view.lines {
            let line_total = line.line_total()?;
            info!(
                name = %line.name,
                quantity = line.quantity,
                line_total = %line_total,
                "Cart line"
            );
        }
        info!(total = %view.total, "Cart total");

        Ok::<_, Box<dyn std::error::Error>>(cart.checkout(Some(PaymentMethod::PayPal)).await?)
    }
    .instrument(span)
    .await?;

    info!(
        order = %order.id(),
        total = %order.total(),
        payment = %order.payment_method(),
        "Order placed"
    );

    if let Some(first) = order.lines().first() {
        store
            .catalog()
            .update(first.product_id, ProductUpdate::default().price(Decimal::new(100, 2)))
            .await?;
        let stored = store.orders().order(order.id()).await?;
        info!(order = %stored.id(), total = %stored.total(), "Order unchanged after price drop");
    }

    match cart.checkout(Some(PaymentMethod::Card)).await {
        Ok(order) => info!(order = %order.id(), "Unexpected second order"),
        Err(e) => warn!(error = %e, kind = ?e.kind(), "Second checkout rejected"),
    }

    store.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

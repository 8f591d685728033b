use actor_framework::{ActorClient, ResourceEvent};
use rust_decimal::Decimal;
use storefront::cart_session::CartError;
use storefront::catalog_actor::CatalogError;
use storefront::errors::ErrorKind;
use storefront::lifecycle::{Storefront, StorefrontConfig};
use storefront::model::{PaymentMethod, ProductId, ProductUpdate, UserId};
use storefront::order_actor::OrderError;

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

async fn seeded() -> (Storefront, ProductId, ProductId, ProductId) {
    let store = Storefront::start(StorefrontConfig {
        seed_catalog: true,
        ..StorefrontConfig::default()
    })
    .await
    .expect("Failed to start storefront");
    let ids = store
        .catalog()
        .list()
        .await
        .expect("Failed to list catalog")
        .into_iter()
        .map(|p| p.id)
        .collect::<Vec<_>>();
    (store, ids[0], ids[1], ids[2])
}

/// Full end-to-end test with all real actors: browse, fill a cart, check out.
#[tokio::test]
async fn test_full_storefront_integration() {
    let (store, laptop, smartphone, _) = seeded().await;

    // Seeded products come back in insertion order
    let catalog = store.catalog().list().await.expect("Failed to list");
    let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Smartphone", "Headphones"]);
    let descriptions: Vec<&str> = catalog.iter().map(|p| p.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "A high performance laptop",
            "Latest Android smartphone",
            "Noise-cancelling headphones"
        ]
    );

    let cart = store.session("alice");
    cart.add_item(laptop, 1).await.expect("Failed to add laptop");
    cart.add_item(smartphone, 2)
        .await
        .expect("Failed to add smartphone");

    let total = cart.total().await.expect("Failed to total cart");
    assert_eq!(total, price(199997));

    let order = cart
        .checkout(Some(PaymentMethod::Card))
        .await
        .expect("Checkout failed");
    assert_eq!(order.total(), total);
    assert_eq!(order.user_id(), &UserId::from("alice"));
    assert_eq!(order.payment_method(), PaymentMethod::Card);
    assert_eq!(order.lines().len(), 2);
    assert_eq!(order.lines()[1].name, "Smartphone");
    assert_eq!(order.lines()[1].quantity, 2);

    // Cart is empty after a successful checkout
    assert!(cart.is_empty().await.expect("Failed to read cart"));
    assert_eq!(cart.total().await.expect("Failed to total"), Decimal::ZERO);

    // The order book has it
    let stored = store.orders().order(order.id()).await.expect("Order missing");
    assert_eq!(stored, order);

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn add_get_round_trip_and_validation() {
    let store = Storefront::new();
    let catalog = store.catalog();

    let id = catalog
        .add("Desk Lamp", "LED, dimmable", price(3450))
        .await
        .expect("Failed to add product");
    let product = catalog.product(id).await.expect("Failed to get product");
    assert_eq!(product.name, "Desk Lamp");
    assert_eq!(product.description, "LED, dimmable");
    assert_eq!(product.price, price(3450));

    let err = catalog.add("  ", "", price(100)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = catalog.add("Lamp", "", price(-1)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(
        catalog.product(ProductId(99)).await,
        Err(CatalogError::NotFound("product_99".into()))
    );

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn update_is_all_or_nothing() {
    let (store, laptop, _, _) = seeded().await;
    let catalog = store.catalog();

    let err = catalog
        .update(
            laptop,
            ProductUpdate::default().name("Gaming Laptop").price(price(-5)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ValidationError(_)));

    let unchanged = catalog.product(laptop).await.expect("Failed to get");
    assert_eq!(unchanged.name, "Laptop");
    assert_eq!(unchanged.price, price(99999));

    let updated = catalog
        .update(laptop, ProductUpdate::default().description("Refurbished"))
        .await
        .expect("Failed to update");
    assert_eq!(updated.description, "Refurbished");
    assert_eq!(updated.price, price(99999));

    assert!(matches!(
        catalog.update(ProductId(42), ProductUpdate::default()).await,
        Err(CatalogError::NotFound(_))
    ));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn remove_twice_fails() {
    let (store, _, _, headphones) = seeded().await;
    let catalog = store.catalog();

    catalog.remove(headphones).await.expect("Failed to remove");
    assert_eq!(catalog.remove(headphones).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert!(catalog.get(headphones).await.expect("Get failed").is_none());

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn search_is_case_insensitive_ordered_and_restartable() {
    let store = Storefront::new();
    let catalog = store.catalog();
    for name in ["Smartphone", "Laptop", "Phone Case", "Headphones", "Telephone"] {
        catalog.add(name, "", price(1000)).await.expect("Failed to add");
    }

    let hits = catalog.search("PhOnE").await.expect("Search failed");
    let first: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    let second: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(first, vec!["Smartphone", "Phone Case", "Headphones", "Telephone"]);
    assert_eq!(first, second);

    // Searching again yields the same sequence
    let again = catalog.search("phone").await.expect("Search failed");
    assert_eq!(again.into_vec(), hits.clone().into_vec());

    assert_eq!(catalog.search("").await.expect("Search failed").len(), 5);
    assert!(catalog.search("tablet").await.expect("Search failed").is_empty());

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn cart_merges_and_sets_quantities() {
    let (store, laptop, smartphone, _) = seeded().await;
    let cart = store.session("bob");

    assert_eq!(cart.add_item(smartphone, 2).await, Ok(2));
    assert_eq!(cart.add_item(smartphone, 3).await, Ok(5));
    cart.add_item(laptop, 1).await.expect("Failed to add");

    let lines = cart.lines().await.expect("Failed to read lines");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id, smartphone);
    assert_eq!(lines[0].quantity, 5);

    cart.set_quantity(smartphone, 0).await.expect("Failed to set");
    assert_eq!(cart.total().await.expect("Failed to total"), price(99999));

    assert_eq!(
        cart.set_quantity(smartphone, 1).await,
        Err(CartError::NotInCart(smartphone))
    );
    assert_eq!(
        cart.remove_item(smartphone).await,
        Err(CartError::NotInCart(smartphone))
    );
    assert_eq!(
        cart.add_item(ProductId(77), 1).await,
        Err(CartError::UnknownProduct(ProductId(77)))
    );
    assert!(matches!(
        cart.add_item(laptop, 0).await,
        Err(CartError::ValidationError(_))
    ));

    cart.clear().await.expect("Failed to clear");
    assert!(cart.is_empty().await.expect("Failed to read cart"));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn total_follows_price_changes_and_fails_on_removed_products() {
    let (store, laptop, _, headphones) = seeded().await;
    let cart = store.session("carol");
    cart.add_item(laptop, 2).await.expect("Failed to add");
    cart.add_item(headphones, 1).await.expect("Failed to add");
    assert_eq!(cart.total().await.expect("Failed to total"), price(219997));

    store
        .catalog()
        .update(laptop, ProductUpdate::default().price(price(90000)))
        .await
        .expect("Failed to update");
    assert_eq!(cart.total().await.expect("Failed to total"), price(199999));

    store.catalog().remove(headphones).await.expect("Failed to remove");
    let err = cart.total().await.unwrap_err();
    assert_eq!(err, CartError::UnknownProduct(headphones));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let view = cart.view().await.unwrap_err();
    assert_eq!(view, CartError::UnknownProduct(headphones));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn sessions_are_per_user() {
    let (store, laptop, smartphone, _) = seeded().await;

    store.session("alice").add_item(laptop, 1).await.expect("Failed to add");
    store.session("bob").add_item(smartphone, 1).await.expect("Failed to add");

    // A second handle for alice sees the same cart
    let alice = store.session("alice");
    let lines = alice.lines().await.expect("Failed to read lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, laptop);
    assert_eq!(store.active_sessions(), 2);

    assert!(store.end_session(&UserId::from("bob")));
    assert!(!store.end_session(&UserId::from("bob")));
    assert!(store
        .session("bob")
        .is_empty()
        .await
        .expect("Failed to read cart"));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn catalog_changes_are_broadcast() {
    let store = Storefront::new();
    let mut events = store
        .catalog()
        .subscribe()
        .expect("Real catalog publishes events");

    let id = store
        .catalog()
        .add("Mouse", "", price(2500))
        .await
        .expect("Failed to add");
    let _ = store.catalog().add("", "", price(1)).await;
    store
        .catalog()
        .update(id, ProductUpdate::default().price(price(2000)))
        .await
        .expect("Failed to update");
    store.catalog().remove(id).await.expect("Failed to remove");

    assert_eq!(events.recv().await.unwrap(), ResourceEvent::Created(id));
    assert_eq!(events.recv().await.unwrap(), ResourceEvent::Updated(id));
    assert_eq!(events.recv().await.unwrap(), ResourceEvent::Deleted(id));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn shutdown_completes_while_clients_are_held() {
    let (store, laptop, _, _) = seeded().await;
    let catalog = store.catalog().clone();
    let cart = store.session("dave");
    cart.add_item(laptop, 1).await.expect("Failed to add");

    store.shutdown().await.expect("Shutdown failed");

    assert_eq!(
        catalog.list().await.unwrap_err().kind(),
        ErrorKind::Unavailable
    );
    assert_eq!(cart.total().await.unwrap_err().kind(), ErrorKind::Unavailable);
    assert!(matches!(
        cart.checkout(Some(PaymentMethod::Card)).await,
        Err(OrderError::ActorCommunicationError(_))
    ));
}

/// A cart whose total cannot be represented fails for its owner only.
#[tokio::test]
async fn oversized_total_fails_without_affecting_other_shoppers() {
    let store = Storefront::new();
    let yacht = store
        .catalog()
        .add("Yacht", "", Decimal::MAX)
        .await
        .expect("Failed to add");
    let pen = store
        .catalog()
        .add("Pen", "", price(100))
        .await
        .expect("Failed to add");

    let alice = store.session("alice");
    alice.add_item(yacht, 2).await.expect("Failed to add");
    let err = alice.total().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = alice.checkout(Some(PaymentMethod::Card)).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));

    // Alice's session survives and still holds the line
    assert!(!alice.is_closed());
    assert_eq!(alice.lines().await.expect("Failed to read lines")[0].quantity, 2);

    let bob = store.session("bob");
    bob.add_item(pen, 1).await.expect("Failed to add");
    let order = bob
        .checkout(Some(PaymentMethod::Card))
        .await
        .expect("Checkout failed");
    assert_eq!(order.total(), price(100));

    store.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn start_rejects_invalid_config() {
    let config = StorefrontConfig {
        catalog_buffer: 0,
        ..StorefrontConfig::default()
    };
    assert!(Storefront::start(config).await.is_err());
}

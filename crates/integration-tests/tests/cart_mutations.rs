//! Integration tests for cart mutations through the provider handle.
//!
//! These exercise the public surface the way a UI would: a mounted provider,
//! a cloneable handle, and injected feedback capabilities.

use std::sync::Arc;

use duka_cart::storage::MemoryStorage;
use duka_cart::{CartError, CartProvider, NewCartItem, Silent};
use duka_core::{Price, ProductId};
use duka_integration_tests::{CountingCues, RecordingSink, init_logging};

fn product(id: &str, name: &str, cents: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents).expect("valid price"),
        image: String::new(),
    }
}

fn silent_provider() -> CartProvider {
    CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::new(Silent),
        Arc::new(Silent),
        None,
    )
}

// =============================================================================
// Totals and uniqueness
// =============================================================================

#[test]
fn test_distinct_adds_produce_unique_items() {
    init_logging();
    let provider = silent_provider();
    let cart = provider.cart().expect("mounted");

    for (i, name) in ["Maize flour", "Cooking oil", "Sugar", "Tea leaves"]
        .iter()
        .enumerate()
    {
        cart.add_to_cart(product(&format!("p{i}"), name, 10000))
            .expect("add");
    }

    assert_eq!(cart.total_items().expect("total"), 4);

    let items = cart.items().expect("items");
    let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str().to_owned()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4, "no duplicate ids");
}

#[test]
fn test_same_product_twice_is_one_item_quantity_two() {
    init_logging();
    let provider = silent_provider();
    let cart = provider.cart().expect("mounted");

    cart.add_to_cart(product("p1", "Sukuma wiki", 4000)).expect("add");
    cart.add_to_cart(product("p1", "Sukuma wiki", 4000)).expect("add");

    let items = cart.items().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().map(|i| i.quantity), Some(2));
}

#[test]
fn test_total_price_matches_fresh_recomputation() {
    init_logging();
    let provider = silent_provider();
    let cart = provider.cart().expect("mounted");

    cart.add_to_cart(product("p1", "A", 1250)).expect("add");
    cart.add_to_cart(product("p2", "B", 990)).expect("add");
    cart.update_quantity(&ProductId::new("p2"), 4).expect("update");

    let expected: Price = cart
        .items()
        .expect("items")
        .iter()
        .map(duka_cart::CartItem::line_total)
        .sum();
    assert_eq!(cart.total_price().expect("total"), expected);
    assert_eq!(expected, Price::from_cents(1250 + 4 * 990).expect("price"));
}

#[test]
fn test_update_quantity_zero_removes_exactly_one_item() {
    init_logging();
    let provider = silent_provider();
    let cart = provider.cart().expect("mounted");

    cart.add_to_cart(product("p1", "A", 100)).expect("add");
    cart.add_to_cart(product("p2", "B", 100)).expect("add");

    cart.update_quantity(&ProductId::new("p1"), 0).expect("update");

    let items = cart.items().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().map(|i| i.id.as_str()), Some("p2"));
}

// =============================================================================
// Feedback contract
// =============================================================================

#[test]
fn test_clear_on_empty_cart_notifies() {
    init_logging();
    let sink = RecordingSink::shared();
    let provider = CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::clone(&sink) as Arc<dyn duka_cart::NotificationSink>,
        Arc::new(Silent),
        None,
    );
    let cart = provider.cart().expect("mounted");

    cart.clear_cart().expect("clear");

    assert!(cart.items().expect("items").is_empty());
    assert_eq!(sink.titles(), vec!["Cart cleared"]);
}

#[test]
fn test_remove_notifies_naming_the_item() {
    init_logging();
    let sink = RecordingSink::shared();
    let provider = CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::clone(&sink) as Arc<dyn duka_cart::NotificationSink>,
        Arc::new(Silent),
        None,
    );
    let cart = provider.cart().expect("mounted");
    cart.add_to_cart(product("p1", "Maize flour", 18500)).expect("add");

    cart.remove_from_cart(&ProductId::new("p1")).expect("remove");

    assert!(cart.items().expect("items").is_empty());
    assert_eq!(
        sink.titles().last().map(String::as_str),
        Some("Removed from cart")
    );
    let body = sink.last_body().unwrap_or_default();
    assert!(body.contains("Maize flour"), "body must name the item: {body}");
}

#[test]
fn test_update_quantity_zero_notifies_like_remove() {
    init_logging();
    let sink = RecordingSink::shared();
    let provider = CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::clone(&sink) as Arc<dyn duka_cart::NotificationSink>,
        Arc::new(Silent),
        None,
    );
    let cart = provider.cart().expect("mounted");
    cart.add_to_cart(product("p1", "Maize flour", 18500)).expect("add");

    cart.update_quantity(&ProductId::new("p1"), 0).expect("update");

    assert_eq!(
        sink.titles().last().map(String::as_str),
        Some("Removed from cart")
    );
    assert!(sink.last_body().unwrap_or_default().contains("Maize flour"));
}

#[test]
fn test_remove_nonexistent_is_silent() {
    init_logging();
    let sink = RecordingSink::shared();
    let provider = CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::clone(&sink) as Arc<dyn duka_cart::NotificationSink>,
        Arc::new(Silent),
        None,
    );
    let cart = provider.cart().expect("mounted");
    cart.add_to_cart(product("p1", "A", 100)).expect("add");
    let before = sink.count();

    cart.remove_from_cart(&ProductId::new("ghost")).expect("remove");

    assert_eq!(cart.items().expect("items").len(), 1);
    assert_eq!(sink.count(), before);
}

#[test]
fn test_cue_fires_on_both_add_branches() {
    init_logging();
    let cues = CountingCues::shared();
    let provider = CartProvider::mount(
        Box::new(MemoryStorage::new()),
        Arc::new(Silent),
        Arc::clone(&cues) as Arc<dyn duka_cart::CueEmitter>,
        None,
    );
    let cart = provider.cart().expect("mounted");

    cart.add_to_cart(product("p1", "A", 100)).expect("add"); // new item
    cart.add_to_cart(product("p1", "A", 100)).expect("add"); // increment

    assert_eq!(cues.count(), 2);
}

// =============================================================================
// Provider scope
// =============================================================================

#[test]
fn test_surface_unusable_outside_provider_scope() {
    init_logging();
    let mut provider = silent_provider();
    let cart = provider.cart().expect("mounted");
    cart.add_to_cart(product("p1", "A", 100)).expect("add");

    provider.unmount();

    assert_eq!(cart.items(), Err(CartError::OutsideProvider));
    assert_eq!(cart.total_price(), Err(CartError::OutsideProvider));
    assert_eq!(cart.clear_cart(), Err(CartError::OutsideProvider));
    assert!(provider.cart().is_err());
}

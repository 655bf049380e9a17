//! End-to-end cart behavior: product card → draft → store → disk → reload.

use std::fs;
use std::sync::Arc;

use finds_cart::{
    CartConfig, CartError, CartSnapshot, CartStorage, CartStore, FileStorage, LineKey,
    MemoryStorage, CART_SNAPSHOT_VERSION,
};
use finds_core::types::{Inventory, Product, ProductOption, Variant};
use finds_core::{CoreError, LineDraft, Money, ProductView, Selection, MAX_PRICE_CENTS};

fn variant(id: &str, size: &str, color: &str, stock: i64) -> Variant {
    Variant {
        id: id.to_string(),
        options: [("Size", size), ("Color", color)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        price: None,
        compare_at: None,
        stock: Inventory::Count(stock),
        image: None,
    }
}

fn flannel() -> Product {
    Product {
        id: "flannel".to_string(),
        title: "Vintage Flannel".to_string(),
        slug: "vintage-flannel".to_string(),
        description: None,
        price: Money::from_cents(8000),
        compare_at: Some(Money::from_cents(10000)),
        options: vec![
            ProductOption::new("Size", &["S", "M"]),
            ProductOption::new("Color", &["Red", "Blue"]),
        ],
        variants: vec![
            variant("s-red", "S", "Red", 0),
            variant("s-blue", "S", "Blue", 3),
            variant("m-red", "M", "Red", 1),
        ],
        tags: vec!["Vintage".to_string(), "Good Condition".to_string()],
        attributes: Default::default(),
        featured: false,
        images: vec!["flannel.jpg".to_string()],
        stock: Inventory::default(),
    }
}

fn simple_draft(product_id: &str, price: i64) -> LineDraft {
    LineDraft {
        product_id: product_id.to_string(),
        variant_id: None,
        title: product_id.to_string(),
        unit_price: Money::from_cents(price),
        compare_at: None,
        selection: Selection::new(),
        purchasable: true,
    }
}

fn file_store(dir: &std::path::Path) -> CartStore {
    let storage = FileStorage::new(dir).unwrap();
    CartStore::open(Arc::new(storage), CartConfig::default())
}

#[test]
fn test_card_to_cart_to_disk_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let product = flannel();

    {
        let store = file_store(dir.path());
        let mut view = ProductView::new(&product);

        // Nothing selected: no draft.
        assert!(matches!(view.line_draft(), Err(CoreError::NoMatch { .. })));

        view.select("Size", "S").unwrap();
        view.select("Color", "Blue").unwrap();
        store.add_line(view.purchasable_draft().unwrap()).unwrap();
        store.add_line(view.purchasable_draft().unwrap()).unwrap();

        assert_eq!(store.totals().line_count, 1);
        assert_eq!(store.total_items(), 2);
    }

    let store = file_store(dir.path());
    let lines = store.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].variant_id.as_deref(), Some("s-blue"));
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].unit_price.cents(), 8000);
    assert_eq!(lines[0].compare_at, Some(Money::from_cents(10000)));
    assert_eq!(lines[0].selection.get("Color"), Some("Blue"));
    assert_eq!(store.totals().total_savings.cents(), 4000);
}

#[test]
fn test_out_of_stock_variant_is_rejected() {
    let product = flannel();
    let store = CartStore::in_memory(CartConfig::default());
    let mut view = ProductView::new(&product);
    view.select("Size", "S").unwrap();
    view.select("Color", "Red").unwrap();

    let draft = view.line_draft().unwrap();
    assert!(store.add_line(draft).is_err());
    assert_eq!(store.total_items(), 0);
}

#[test]
fn test_total_price_ignores_add_order() {
    let a = CartStore::in_memory(CartConfig::default());
    let b = CartStore::in_memory(CartConfig::default());

    for (id, price) in [("x", 1000), ("y", 2550), ("x", 1000), ("z", 99)] {
        a.add_line(simple_draft(id, price)).unwrap();
    }
    for (id, price) in [("z", 99), ("x", 1000), ("y", 2550), ("x", 1000)] {
        b.add_line(simple_draft(id, price)).unwrap();
    }

    assert_eq!(a.total_price(), b.total_price());
    assert_eq!(a.total_price().cents(), 4649);
    assert_eq!(a.total_items(), 4);
}

#[test]
fn test_zero_quantity_removes_from_totals() {
    let store = CartStore::in_memory(CartConfig::default());
    store.add_line(simple_draft("x", 1000)).unwrap();
    store.add_line(simple_draft("y", 500)).unwrap();

    store.update_quantity(&LineKey::product("x"), 0).unwrap();
    assert_eq!(store.total_items(), 1);
    assert_eq!(store.total_price().cents(), 500);
}

#[test]
fn test_snapshot_round_trip_reproduces_lines() {
    let store = CartStore::in_memory(CartConfig::default());
    store.add_line(simple_draft("x", 1000)).unwrap();
    store.add_line(simple_draft("y", 500)).unwrap();
    store.update_quantity(&LineKey::product("y"), 4).unwrap();

    let json = store.snapshot().to_json().unwrap();
    let restored = CartSnapshot::from_json(&json).unwrap();
    assert_eq!(restored.version, CART_SNAPSHOT_VERSION);
    assert_eq!(restored.lines, store.lines());
}

#[test]
fn test_corrupt_file_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    let path = storage.path_for("vintage-finds:cart");
    fs::write(&path, r#"{"lines": "oops", "version": 1}"#).unwrap();

    let store = CartStore::open(Arc::new(storage.clone()), CartConfig::default());
    assert_eq!(store.total_items(), 0);

    store.add_line(simple_draft("x", 1000)).unwrap();
    let saved = storage.load("vintage-finds:cart").unwrap().unwrap();
    assert_eq!(CartSnapshot::from_json(&saved).unwrap().lines.len(), 1);
}

#[test]
fn test_old_version_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    storage
        .save(
            "vintage-finds:cart",
            r#"{"lines": [{"productId": "x", "variantId": null, "quantity": 1, "unitPrice": 100, "compareAt": null, "selection": {}}], "version": 0}"#,
        )
        .unwrap();

    let store = CartStore::open(Arc::new(storage), CartConfig::default());
    assert!(store.lines().is_empty());
}

#[test]
fn test_oversized_saved_price_starts_empty() {
    let storage = MemoryStorage::with_entry(
        "vintage-finds:cart",
        r#"{"lines": [{"productId": "x", "variantId": null, "quantity": 2, "unitPrice": 9223372036854775807, "compareAt": null, "selection": {}}], "version": 1}"#,
    );

    let store = CartStore::open(Arc::new(storage), CartConfig::default());
    assert!(store.lines().is_empty());
    assert_eq!(store.total_price(), Money::zero());

    // The store stays usable afterwards.
    store.add_line(simple_draft("x", 1000)).unwrap();
    assert_eq!(store.total_price().cents(), 1000);
}

#[test]
fn test_catalog_price_above_ceiling_is_rejected() {
    let mut product = flannel();
    product.variants.clear();
    product.options.clear();
    product.price = Money::from_cents(MAX_PRICE_CENTS + 1);

    let store = CartStore::in_memory(CartConfig::default());
    let draft = ProductView::new(&product).line_draft().unwrap();

    assert!(matches!(
        store.add_line(draft.clone()),
        Err(CartError::Core(CoreError::Validation(_)))
    ));
    assert!(store.add_line(draft).is_err());
    assert!(store.lines().is_empty());
    assert_eq!(store.total_price(), Money::zero());
}

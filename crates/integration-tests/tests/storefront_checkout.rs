//! Cart and checkout scenarios through the `Storefront` session.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use shopping_mall_core::{Category, CheckoutError, NewProduct, ProductId, ProductUpdate};
use shopping_mall_integration_tests::TestStore;
use shopping_mall_storefront::StorefrontError;

fn product(name: &str, price: &str, stock: u32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        category: Category::General,
        price: price.parse().unwrap(),
        stock,
        description: format!("About {name}"),
    }
}

#[test]
fn test_buy_in_stock_product_skip_sold_out_one() {
    let env = TestStore::new().unwrap();
    let mut store = env.open().unwrap();
    let a = store.add_product(product("A", "2.00", 5)).unwrap();
    let b = store.add_product(product("B", "9.99", 0)).unwrap();

    store.add_to_cart(&a, 3).unwrap();
    assert_eq!(store.cart_total(), Decimal::new(600, 2));

    let before = store.cart().clone();
    assert!(matches!(
        store.add_to_cart(&b, 1),
        Err(StorefrontError::OutOfStock(_))
    ));
    assert_eq!(store.cart(), &before);

    let receipt = store.checkout().unwrap();
    assert_eq!(receipt.total, Decimal::new(600, 2));
    assert_eq!(store.product(&a).unwrap().stock(), 2);
    assert_eq!(store.product(&b).unwrap().stock(), 0);
    assert!(store.cart().is_empty());

    assert_eq!(env.read_cart().unwrap(), "");
    assert!(env.read_products().unwrap().starts_with("p-1;A;GENERAL;2.00;2;About A;\n"));
}

#[test]
fn test_checkout_is_all_or_nothing() {
    let env = TestStore::new().unwrap();
    let mut store = env.open().unwrap();
    let pen = store.add_product(product("Pen", "1.50", 10)).unwrap();
    let ink = store.add_product(product("Ink", "4.00", 2)).unwrap();

    store.add_to_cart(&pen, 4).unwrap();
    store.add_to_cart(&ink, 2).unwrap();
    // Stock drops after the items went into the cart.
    store
        .edit_product(
            &ink,
            ProductUpdate {
                stock: Some(1),
                ..ProductUpdate::default()
            },
        )
        .unwrap();
    let products_before = env.read_products().unwrap();
    let cart_before = store.cart().clone();

    let err = store.checkout().unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Checkout(CheckoutError::InsufficientStock {
            ref product_id,
            requested: 2,
            available: 1,
        }) if *product_id == ink
    ));

    assert_eq!(store.product(&pen).unwrap().stock(), 10);
    assert_eq!(store.product(&ink).unwrap().stock(), 1);
    assert_eq!(store.cart(), &cart_before);
    assert_eq!(env.read_products().unwrap(), products_before);
}

#[test]
fn test_receipt_serializes_for_json_output() {
    let env = TestStore::new().unwrap();
    let mut store = env.open().unwrap();
    let pen = store.add_product(product("Pen", "1.50", 10)).unwrap();
    store.add_to_cart(&pen, 2).unwrap();

    let receipt = store.checkout().unwrap();
    let value = serde_json::to_value(&receipt).unwrap();

    assert_eq!(value["lines"][0]["product_id"], "p-1");
    assert_eq!(value["lines"][0]["name"], "Pen");
    assert_eq!(value["lines"][0]["quantity"], 2);
    assert_eq!(value["total"], "3.00");
}

#[test]
fn test_deleted_product_leaves_cart() {
    let env = TestStore::new().unwrap();
    let mut store = env.open().unwrap();
    let keep = store.add_product(product("Keep", "1.00", 3)).unwrap();
    let gone = store.add_product(product("Gone", "1.00", 3)).unwrap();
    store.add_to_cart(&keep, 1).unwrap();
    store.add_to_cart(&gone, 1).unwrap();

    store.delete_product(&gone).unwrap();

    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart_total(), Decimal::new(100, 2));
    assert!(store.checkout().is_ok());
}

#[test]
fn test_customer_screen_flow() {
    let env = TestStore::new().unwrap();
    let mut store = env.open().unwrap();
    let tea = store.add_product(product("Tea", "3.25", 2)).unwrap();

    store.add_one_to_cart(&tea).unwrap();
    store.add_one_to_cart(&tea).unwrap();
    assert_eq!(store.cart().quantity_of(&tea), 2);

    store.remove_one_from_cart(&tea).unwrap();
    store.remove_one_from_cart(&tea).unwrap();
    assert!(store.cart().is_empty());
    assert!(matches!(
        store.remove_one_from_cart(&tea),
        Err(StorefrontError::ProductNotFound(_))
    ));
    assert!(matches!(
        store.add_one_to_cart(&ProductId::new("nope")),
        Err(StorefrontError::ProductNotFound(_))
    ));
}

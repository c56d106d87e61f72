//! Shopping commands.
//!
//! # Usage
//!
//! ```bash
//! mall-cli -u customer -p 1234 browse -s lamp -c general
//! mall-cli -u customer -p 1234 cart add <ID> -q 2
//! mall-cli -u customer -p 1234 cart remove <ID>
//! mall-cli -u customer -p 1234 cart show
//! mall-cli -u customer -p 1234 checkout
//! ```

use std::io::Write;

use shopping_mall_core::{CatalogFilter, Category, ProductId};
use shopping_mall_storefront::Storefront;

use super::{CommandError, write_products};

/// Print products whose name contains `search`, optionally in one category.
pub fn browse(
    store: &Storefront,
    out: &mut impl Write,
    search: Option<&str>,
    category: Option<Category>,
    json: bool,
) -> Result<(), CommandError> {
    let filter = CatalogFilter::all()
        .with_query(search.unwrap_or_default())
        .with_category(category);
    write_products(out, &store.browse(&filter), json)
}

pub fn add_to_cart(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    store.add_to_cart(id, quantity)?;
    let name = store.product(id)?.name();
    writeln!(out, "Added {quantity} x {name} to cart")?;
    Ok(())
}

/// Take one unit of a product out of the cart.
pub fn remove_one(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CommandError> {
    store.remove_one_from_cart(id)?;
    let left = store.cart().quantity_of(id);
    writeln!(out, "Removed 1 x {id} from cart ({left} left)")?;
    Ok(())
}

pub fn drop_line(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CommandError> {
    store.drop_from_cart(id)?;
    writeln!(out, "Removed {id} from cart")?;
    Ok(())
}

/// Print each cart line with its total, then the cart total.
pub fn show_cart(store: &Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    let cart = store.cart();
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for item in cart.items() {
        // Lines whose product vanished are not priced.
        let Ok(product) = store.product(item.product_id()) else {
            continue;
        };
        writeln!(
            out,
            "{:<24}  {:>4} x {:>10}  = {:>10}",
            product.name(),
            item.quantity(),
            product.price(),
            item.line_total(product),
        )?;
    }
    writeln!(out, "Total: {}", store.cart_total())?;
    Ok(())
}

/// Buy the cart and print the receipt.
pub fn checkout(store: &mut Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    let receipt = store.checkout()?;
    for line in &receipt.lines {
        writeln!(
            out,
            "{:<24}  {:>4} x {:>10}  = {:>10}",
            line.name, line.quantity, line.unit_price, line.line_total,
        )?;
    }
    writeln!(out, "Checkout successful! Total: {}", receipt.total)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopping_mall_core::CheckoutError;
    use shopping_mall_storefront::StorefrontError;

    use super::super::test_support::{open, output, product};
    use super::*;

    #[test]
    fn test_browse_by_name_and_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        store
            .add_product(product("Desk Lamp", Category::General, "19.99", 5))
            .unwrap();
        store
            .add_product(product("Lamp Oil", Category::Food, "3.00", 5))
            .unwrap();
        store
            .add_product(product("Chair", Category::General, "45.00", 1))
            .unwrap();

        let mut out = Vec::new();
        browse(&store, &mut out, Some(" lamp"), Some(Category::General), false).unwrap();
        let text = output(out);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Desk Lamp"));
        assert!(!text.contains("Lamp Oil"));

        let mut out = Vec::new();
        browse(&store, &mut out, None, None, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cart_round() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let pen = store
            .add_product(product("Pen", Category::General, "2.00", 5))
            .unwrap();
        let mut out = Vec::new();

        add_to_cart(&mut store, &mut out, &pen, 3).unwrap();
        remove_one(&mut store, &mut out, &pen).unwrap();
        show_cart(&store, &mut out).unwrap();
        checkout(&mut store, &mut out).unwrap();
        show_cart(&store, &mut out).unwrap();

        let text = output(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Added 3 x Pen to cart");
        assert_eq!(lines[1], "Removed 1 x p-1 from cart (2 left)");
        assert!(lines[2].starts_with("Pen"));
        assert!(lines[2].ends_with("4.00"));
        assert_eq!(lines[3], "Total: 4.00");
        assert_eq!(lines[5], "Checkout successful! Total: 4.00");
        assert_eq!(lines[6], "Your cart is empty.");
        assert_eq!(store.product(&pen).unwrap().stock(), 3);
    }

    #[test]
    fn test_out_of_stock() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let pen = store
            .add_product(product("Pen", Category::General, "2.00", 1))
            .unwrap();
        let mut out = Vec::new();

        let err = add_to_cart(&mut store, &mut out, &pen, 2).unwrap_err();
        assert!(matches!(err, CommandError::Store(StorefrontError::OutOfStock(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_drop_and_empty_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let pen = store
            .add_product(product("Pen", Category::General, "2.00", 1))
            .unwrap();
        let mut out = Vec::new();

        add_to_cart(&mut store, &mut out, &pen, 1).unwrap();
        drop_line(&mut store, &mut out, &pen).unwrap();
        assert!(store.cart().is_empty());

        let err = checkout(&mut store, &mut out).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Store(StorefrontError::Checkout(CheckoutError::EmptyCart))
        ));
    }
}

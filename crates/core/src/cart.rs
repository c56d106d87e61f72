//! Shopping cart.
//!
//! Cart lines hold a [`ProductId`] and a quantity, never a copy of the
//! product. Current price and stock are always resolved through the
//! [`ProductCatalog`], which owns every [`Product`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::product::Product;
use crate::types::{ProductId, saturating_sum};

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    product_id: ProductId,
    quantity: u32,
}

impl CartItem {
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity` for the product this line refers to.
    #[must_use]
    pub fn line_total(&self, product: &Product) -> Decimal {
        product.price().times(self.quantity)
    }
}

/// Ordered cart lines, at most one per product and none with quantity 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingCart {
    items: Vec<CartItem>,
}

impl ShoppingCart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Quantity held for `product_id`, or 0 when it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map_or(0, CartItem::quantity)
    }

    /// Add `quantity` units. An existing line for the same product grows
    /// instead of a second line being appended. Stock is not checked here.
    pub fn add_product(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Drop the line for `product_id` entirely. Returns whether a line was removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> bool {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
        {
            self.items.remove(index);
            return true;
        }
        false
    }

    /// Take `quantity` units off a line, removing it once it reaches zero.
    pub fn decrease_product(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let Some(index) = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
        else {
            return;
        };

        if let Some(item) = self.items.get_mut(index) {
            item.quantity = item.quantity.saturating_sub(quantity);
            if item.quantity == 0 {
                self.items.remove(index);
            }
        }
    }

    /// Sum of line totals at current catalog prices.
    ///
    /// Lines whose product is no longer in the catalog contribute nothing.
    #[must_use]
    pub fn total_price(&self, catalog: &ProductCatalog) -> Decimal {
        saturating_sum(self.items.iter().filter_map(|item| {
            let product = catalog.find_by_id(&item.product_id);
            if product.is_none() {
                tracing::debug!(product_id = %item.product_id, "Cart line refers to unknown product");
            }
            product.map(|p| item.line_total(p))
        }))
    }

    /// Drop lines whose product is missing from `catalog`. Returns how many were dropped.
    pub fn retain_known(&mut self, catalog: &ProductCatalog) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| catalog.find_by_id(&item.product_id).is_some());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

//! Stock-aware cart operations and checkout.
//!
//! [`CartService`] borrows the customer's cart and the catalog for the
//! duration of one operation. Checkout validates every line against current
//! stock before touching anything, so stock is deducted for all lines or for
//! none of them.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::ShoppingCart;
use crate::catalog::{CatalogStore, ProductCatalog};
use crate::product::StockError;
use crate::types::{Price, ProductId, saturating_sum};

/// Why a checkout was refused. Nothing is mutated when one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line refers to a product that is no longer in the catalog.
    #[error("product not found: {0}")]
    UnknownProduct(ProductId),

    /// A cart line asks for more than is in stock.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
}

impl CheckoutError {
    fn from_stock(product_id: &ProductId, error: StockError) -> Self {
        let StockError::Insufficient {
            requested,
            available,
        } = error;
        Self::InsufficientStock {
            product_id: product_id.clone(),
            requested,
            available,
        }
    }
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Decimal,
}

/// What a successful checkout bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: Decimal,
}

/// Cart operations that consult catalog stock.
pub struct CartService<'a> {
    cart: &'a mut ShoppingCart,
    catalog: &'a mut ProductCatalog,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(cart: &'a mut ShoppingCart, catalog: &'a mut ProductCatalog) -> Self {
        Self { cart, catalog }
    }

    /// Add `quantity` units if the product has at least that much stock.
    ///
    /// Refusals are silent; the return value tells whether the cart changed.
    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(product) = self.catalog.find_by_id(product_id) else {
            tracing::debug!(%product_id, "Not adding unknown product to cart");
            return false;
        };

        if quantity == 0 || product.stock() < quantity {
            tracing::debug!(
                %product_id,
                quantity,
                stock = product.stock(),
                "Not adding to cart"
            );
            return false;
        }

        self.cart.add_product(product_id, quantity);
        true
    }

    /// Remove the whole line for `product_id`.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        self.cart.remove_product(product_id)
    }

    /// Take `quantity` units off the line for `product_id`.
    pub fn decrease_in_cart(&mut self, product_id: &ProductId, quantity: u32) {
        self.cart.decrease_product(product_id, quantity);
    }

    /// Cart total at current catalog prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price(self.catalog)
    }

    /// Buy everything in the cart.
    ///
    /// On success every product's stock drops by its cart quantity, the cart
    /// is emptied and the catalog is written to `store`. A failed write is
    /// logged; the purchase itself stands.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] if the cart is empty, a line refers to an
    /// unknown product, or any line exceeds current stock. No stock or cart
    /// state changes in that case.
    pub fn checkout<S: CatalogStore>(&mut self, store: &S) -> Result<Receipt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(self.cart.len());
        for item in self.cart.items() {
            let product = self
                .catalog
                .find_by_id(item.product_id())
                .ok_or_else(|| CheckoutError::UnknownProduct(item.product_id().clone()))?;

            if product.stock() < item.quantity() {
                return Err(CheckoutError::InsufficientStock {
                    product_id: item.product_id().clone(),
                    requested: item.quantity(),
                    available: product.stock(),
                });
            }

            lines.push(ReceiptLine {
                product_id: item.product_id().clone(),
                name: product.name().to_owned(),
                quantity: item.quantity(),
                unit_price: product.price(),
                line_total: item.line_total(product),
            });
        }

        for item in self.cart.items() {
            if let Some(product) = self.catalog.find_by_id_mut(item.product_id()) {
                product
                    .decrease_stock(item.quantity())
                    .map_err(|e| CheckoutError::from_stock(item.product_id(), e))?;
            }
        }

        self.cart.clear();

        if let Err(error) = self.catalog.save(store) {
            tracing::warn!(%error, "Checkout completed but the catalog could not be saved");
        }

        let total = saturating_sum(lines.iter().map(|line| line.line_total));
        tracing::info!(lines = lines.len(), %total, "Checkout completed");
        Ok(Receipt { lines, total })
    }
}

//! Catalog products and their stock.

use serde::Serialize;

use crate::types::{Category, IdGenerator, Price, ProductId};

/// Stock could not be taken from a product.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockError {
    /// More units were requested than are on hand.
    #[error("insufficient stock: requested {requested}, available {available}")]
    Insufficient {
        /// Units asked for.
        requested: u32,
        /// Units on hand.
        available: u32,
    },
}

/// Descriptive fields of a product, without identity or image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub stock: u32,
    pub description: String,
}

/// Field-wise edit of an existing product. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Price>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    /// `Some(None)` clears the image, `Some(Some(path))` replaces it.
    pub image_path: Option<Option<String>>,
}

impl ProductUpdate {
    /// Whether applying this update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.description.is_none()
            && self.image_path.is_none()
    }
}

/// A catalog entry.
///
/// The identity is fixed at construction. Setters trust their input; the only
/// guarded mutation is [`Product::decrease_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    price: Price,
    stock: u32,
    description: String,
    image_path: Option<String>,
}

impl Product {
    /// Create a brand new product with a freshly generated identity.
    pub fn create(ids: &mut impl IdGenerator, fields: NewProduct) -> Self {
        Self::rehydrate(ids.generate(), fields, None)
    }

    /// Rebuild a product whose identity already exists (e.g. read from disk).
    #[must_use]
    pub fn rehydrate(id: ProductId, fields: NewProduct, image_path: Option<String>) -> Self {
        let NewProduct {
            name,
            category,
            price,
            stock,
            description,
        } = fields;
        Self {
            id,
            name,
            category,
            price,
            stock,
            description,
            image_path,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Relative path of the product image, if one has been attached.
    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub const fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub const fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    pub const fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_image_path(&mut self, image_path: Option<String>) {
        self.image_path = image_path;
    }

    /// Add units to stock.
    pub const fn increase_stock(&mut self, amount: u32) {
        self.stock = self.stock.saturating_add(amount);
    }

    /// Take units out of stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Insufficient`] and leaves stock untouched when
    /// `amount` exceeds the units on hand.
    pub const fn decrease_stock(&mut self, amount: u32) -> Result<(), StockError> {
        if amount > self.stock {
            return Err(StockError::Insufficient {
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        Ok(())
    }

    /// Apply an edit in place.
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image_path) = update.image_path {
            self.image_path = image_path;
        }
    }
}

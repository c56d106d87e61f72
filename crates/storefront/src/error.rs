//! Unified error type for storefront operations.

use shopping_mall_core::{CheckoutError, PriceError, ProductId};
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::images::ImageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Reading or writing a store file failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Login failed or the account may not do this.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Importing an image failed.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Checkout was refused.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A price was negative or not a number.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// No product has this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product has no stock left for the request.
    #[error("Out of stock: {0}")]
    OutOfStock(ProductId),

    /// A text field holds characters the catalog file cannot store.
    #[error("Invalid {field}: must not contain ';' or line breaks")]
    InvalidField { field: &'static str },
}

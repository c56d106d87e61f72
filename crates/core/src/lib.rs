//! Shopping Mall Core - catalog and cart domain model.
//!
//! This crate provides the types and rules shared by every front end of the
//! store:
//! - `storefront` - File persistence, configuration and the session facade
//! - `cli` - Command-line tools for administrators and customers
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no file I/O. Persistence
//! is reached through the [`CatalogStore`] trait, implemented by the
//! storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identities, prices, categories and roles
//! - [`product`] - Catalog entries and the stock guard
//! - [`cart`] - Cart lines keyed by product identity
//! - [`catalog`] - The ordered product catalog and browsing filter
//! - [`checkout`] - Stock-aware cart operations and all-or-nothing checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod product;
pub mod types;

pub use cart::{CartItem, ShoppingCart};
pub use catalog::{CatalogFilter, CatalogStore, ProductCatalog};
pub use checkout::{CartService, CheckoutError, Receipt, ReceiptLine};
pub use product::{NewProduct, Product, ProductUpdate, StockError};
pub use types::*;

//! Shopping Mall storefront library.
//!
//! File-backed persistence, configuration and services around the domain
//! types in `shopping_mall_core`. Front ends open a [`state::Storefront`]
//! and drive it; everything they change is written back to disk.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

pub use config::StoreConfig;
pub use error::StorefrontError;
pub use state::Storefront;

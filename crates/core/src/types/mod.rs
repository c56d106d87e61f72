//! Core value types for the store.
//!
//! This module provides type-safe wrappers for identities, prices,
//! categories and roles.

pub mod category;
pub mod id;
pub mod price;
pub mod role;

pub use category::Category;
pub use id::{IdGenerator, ProductId, SequentialIds, UuidGenerator};
pub use price::{Price, PriceError, saturating_sum};
pub use role::Role;

//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Login against the built-in administrator and customer accounts
//! - `images` - Copying product images into the image directory

pub mod auth;
pub mod images;

pub use auth::{AuthError, AuthService};
pub use images::{ImageError, ImageLibrary};

//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MALL_PRODUCTS_FILE` - Catalog file (default: products.csv)
//! - `MALL_CART_FILE` - Cart file (default: cart.csv)
//! - `MALL_IMAGES_DIR` - Directory name for imported images (default: images)
//!
//! Relative paths resolve against the working directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_PRODUCTS_FILE: &str = "products.csv";
pub const DEFAULT_CART_FILE: &str = "cart.csv";
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the store keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Catalog file
    pub products_file: PathBuf,
    /// Cart file
    pub cart_file: PathBuf,
    /// Directory that recorded image paths are relative to
    pub images_root: PathBuf,
    /// Name of the image directory inside `images_root`
    pub images_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            products_file: PathBuf::from(DEFAULT_PRODUCTS_FILE),
            cart_file: PathBuf::from(DEFAULT_CART_FILE),
            images_root: PathBuf::from("."),
            images_dir: DEFAULT_IMAGES_DIR.to_owned(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but empty,
    /// or if `MALL_IMAGES_DIR` contains `;` or a line break.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(get_optional_env)
    }

    /// All files under `dir`, with default names.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            products_file: dir.join(DEFAULT_PRODUCTS_FILE),
            cart_file: dir.join(DEFAULT_CART_FILE),
            images_root: dir.to_path_buf(),
            images_dir: DEFAULT_IMAGES_DIR.to_owned(),
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| get_non_empty(&lookup, key, default);

        Ok(Self {
            products_file: PathBuf::from(get("MALL_PRODUCTS_FILE", DEFAULT_PRODUCTS_FILE)?),
            cart_file: PathBuf::from(get("MALL_CART_FILE", DEFAULT_CART_FILE)?),
            images_root: PathBuf::from("."),
            images_dir: check_storable(
                "MALL_IMAGES_DIR",
                get("MALL_IMAGES_DIR", DEFAULT_IMAGES_DIR)?,
            )?,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a variable with a default value, rejecting blank overrides.
fn get_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value),
    }
}

/// Image paths are stored inside `;`-separated catalog lines.
fn check_storable(key: &str, value: String) -> Result<String, ConfigError> {
    if value.contains([';', '\n', '\r']) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not contain ';' or line breaks".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("MALL_PRODUCTS_FILE", "/srv/mall/catalog.csv"),
            ("MALL_IMAGES_DIR", "pictures"),
        ]))
        .unwrap();
        assert_eq!(config.products_file, PathBuf::from("/srv/mall/catalog.csv"));
        assert_eq!(config.cart_file, PathBuf::from("cart.csv"));
        assert_eq!(config.images_dir, "pictures");
    }

    #[test]
    fn test_empty_value_is_invalid() {
        let err = StoreConfig::from_lookup(lookup(&[("MALL_CART_FILE", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MALL_CART_FILE"));
    }

    #[test]
    fn test_images_dir_must_fit_catalog_line() {
        for bad in ["pics;old", "pics\nold"] {
            let err =
                StoreConfig::from_lookup(lookup(&[("MALL_IMAGES_DIR", bad)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MALL_IMAGES_DIR")
            );
        }
    }

    #[test]
    fn test_in_dir() {
        let config = StoreConfig::in_dir("/data");
        assert_eq!(config.products_file, PathBuf::from("/data/products.csv"));
        assert_eq!(config.cart_file, PathBuf::from("/data/cart.csv"));
        assert_eq!(config.images_root, PathBuf::from("/data"));
        assert_eq!(config.images_dir, "images");
    }
}

//! Integration tests for the Shopping Mall store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-mall-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_checkout` - Cart and checkout scenarios through `Storefront`
//! - `storefront_files` - What ends up in `products.csv` and `cart.csv`
//!
//! Every scenario runs against files in its own temporary directory.

use std::io;
use std::path::PathBuf;

use shopping_mall_core::SequentialIds;
use shopping_mall_storefront::{StoreConfig, Storefront, StorefrontError};
use tempfile::TempDir;

/// A throwaway data directory.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Create an empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    #[must_use]
    pub fn config(&self) -> StoreConfig {
        StoreConfig::in_dir(self.dir.path())
    }

    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Open the store with ids `p-1`, `p-2`, ...
    ///
    /// # Errors
    ///
    /// Returns whatever `Storefront::open_with_ids` returns.
    pub fn open(&self) -> Result<Storefront, StorefrontError> {
        Storefront::open_with_ids(&self.config(), SequentialIds::new("p"))
    }

    /// Replace `products.csv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_products(&self, contents: &str) -> io::Result<()> {
        std::fs::write(self.path("products.csv"), contents)
    }

    /// Replace `cart.csv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_cart(&self, contents: &str) -> io::Result<()> {
        std::fs::write(self.path("cart.csv"), contents)
    }

    /// Current `products.csv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_products(&self) -> io::Result<String> {
        std::fs::read_to_string(self.path("products.csv"))
    }

    /// Current `cart.csv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_cart(&self) -> io::Result<String> {
        std::fs::read_to_string(self.path("cart.csv"))
    }
}

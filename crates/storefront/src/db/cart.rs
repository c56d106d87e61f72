//! Cart file repository.

use std::path::{Path, PathBuf};

use shopping_mall_core::{ProductCatalog, ProductId, ShoppingCart};

use super::{FIELD_SEPARATOR, RepositoryError, read_if_exists, split_fields, write_lines};

/// Reads and writes a cart as `productId;quantity` lines.
///
/// Loading resolves ids against the current catalog: lines for products that
/// no longer exist are dropped and quantities are capped at current stock.
#[derive(Debug, Clone)]
pub struct CartFileRepository {
    path: PathBuf,
}

impl CartFileRepository {
    /// Create a repository for the cart file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild the saved cart against `catalog`.
    ///
    /// Lines are skipped when they do not have exactly two fields, when the
    /// quantity is not an integer, when the product is unknown, or when the
    /// quantity capped at current stock is zero. Repeated lines for one
    /// product accumulate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read.
    pub fn try_load(&self, catalog: &ProductCatalog) -> Result<ShoppingCart, RepositoryError> {
        let mut cart = ShoppingCart::new();
        let Some(contents) = read_if_exists(&self.path)? else {
            return Ok(cart);
        };

        for (index, line) in contents.lines().enumerate() {
            let line_no = index + 1;
            let fields = split_fields(line);
            let [id, quantity] = fields.as_slice() else {
                tracing::debug!(line = line_no, "Skipping malformed cart line");
                continue;
            };

            let Ok(quantity) = quantity.trim().parse::<u32>() else {
                tracing::debug!(line = line_no, "Skipping cart line with invalid quantity");
                continue;
            };

            let product_id = ProductId::new(id.trim());
            let Some(product) = catalog.find_by_id(&product_id) else {
                tracing::debug!(line = line_no, %product_id, "Skipping cart line for unknown product");
                continue;
            };

            let quantity = quantity.min(product.stock());
            if quantity == 0 {
                continue;
            }

            cart.add_product(&product_id, quantity);
        }

        tracing::info!(path = %self.path.display(), lines = cart.len(), "Cart loaded");
        Ok(cart)
    }

    /// Like [`try_load`](Self::try_load), but an unreadable file is logged
    /// and treated as an empty cart.
    #[must_use]
    pub fn load(&self, catalog: &ProductCatalog) -> ShoppingCart {
        self.try_load(catalog).unwrap_or_else(|error| {
            tracing::error!(%error, "Error loading cart from file");
            ShoppingCart::new()
        })
    }

    /// Overwrite the file with one line per cart item, in cart order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be written.
    pub fn try_save(&self, cart: &ShoppingCart) -> Result<(), RepositoryError> {
        write_lines(
            &self.path,
            cart.items().iter().map(|item| {
                format!("{}{FIELD_SEPARATOR}{}", item.product_id(), item.quantity())
            }),
        )?;
        tracing::debug!(path = %self.path.display(), lines = cart.len(), "Cart saved");
        Ok(())
    }

    /// Like [`try_save`](Self::try_save), but failures are only logged.
    pub fn save(&self, cart: &ShoppingCart) {
        if let Err(error) = self.try_save(cart) {
            tracing::error!(%error, "Error saving cart to file");
        }
    }
}

//! The store session: catalog, cart and their files.
//!
//! [`Storefront`] is what a front end talks to. Every mutation is written
//! through to disk immediately: admin edits save the catalog, cart edits save
//! the cart, checkout saves both.

use std::path::Path;

use rust_decimal::Decimal;
use shopping_mall_core::{
    CartService, CatalogFilter, IdGenerator, NewProduct, Product, ProductCatalog, ProductId,
    ProductUpdate, Receipt, ShoppingCart, UuidGenerator,
};

use crate::config::StoreConfig;
use crate::db::{CartFileRepository, ProductFileRepository};
use crate::error::StorefrontError;
use crate::services::images::ImageLibrary;

/// One open store.
pub struct Storefront {
    catalog: ProductCatalog,
    cart: ShoppingCart,
    products: ProductFileRepository,
    carts: CartFileRepository,
    images: ImageLibrary,
    ids: Box<dyn IdGenerator + Send>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.products.path())
            .field("cart", &self.carts.path())
            .field("catalog_len", &self.catalog.len())
            .field("cart_len", &self.cart.len())
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Open the store described by `config`, with random product ids.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Repository` if the catalog file has a line
    /// that does not parse. Missing or unreadable files start empty.
    pub fn open(config: &StoreConfig) -> Result<Self, StorefrontError> {
        Self::open_with_ids(config, UuidGenerator)
    }

    /// Open the store with a specific id generator.
    ///
    /// The catalog is loaded first; the cart is then resolved against it.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub fn open_with_ids(
        config: &StoreConfig,
        ids: impl IdGenerator + Send + 'static,
    ) -> Result<Self, StorefrontError> {
        check_text("images_dir", &config.images_dir)?;

        let products = ProductFileRepository::new(&config.products_file);
        let carts = CartFileRepository::new(&config.cart_file);

        let mut catalog = ProductCatalog::new();
        catalog.load(&products)?;
        let cart = carts.load(&catalog);

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Store opened"
        );

        Ok(Self {
            catalog,
            cart,
            products,
            carts,
            images: ImageLibrary::new(&config.images_root, config.images_dir.clone()),
            ids: Box::new(ids),
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    #[must_use]
    pub const fn images(&self) -> &ImageLibrary {
        &self.images
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id.
    pub fn product(&self, id: &ProductId) -> Result<&Product, StorefrontError> {
        self.catalog
            .find_by_id(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn browse(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.catalog.filter(filter).collect()
    }

    // Catalog administration

    /// Create a product with a fresh id and save the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidField` if the name or description
    /// cannot be stored in the catalog file.
    pub fn add_product(&mut self, fields: NewProduct) -> Result<ProductId, StorefrontError> {
        check_text("name", &fields.name)?;
        check_text("description", &fields.description)?;

        let product = Product::create(&mut self.ids, fields);
        let id = product.id().clone();
        tracing::info!(product_id = %id, name = product.name(), "Product added");
        self.catalog.add_product(product);
        self.save_catalog();
        Ok(id)
    }

    /// Edit a product in place and save the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id and
    /// `StorefrontError::InvalidField` for unstorable text.
    pub fn edit_product(
        &mut self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<(), StorefrontError> {
        if let Some(name) = &update.name {
            check_text("name", name)?;
        }
        if let Some(description) = &update.description {
            check_text("description", description)?;
        }

        let product = self
            .catalog
            .find_by_id_mut(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
        product.apply(update);
        tracing::info!(product_id = %id, "Product updated");
        self.save_catalog();
        Ok(())
    }

    /// Remove a product from the catalog and from the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Product, StorefrontError> {
        let removed = self
            .catalog
            .remove_product_by_id(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
        tracing::info!(product_id = %id, "Product deleted");
        self.save_catalog();

        if self.cart.remove_product(id) {
            tracing::debug!(product_id = %id, "Deleted product evicted from cart");
            self.save_cart();
        }
        Ok(removed)
    }

    /// Copy `source` into the image directory and attach it to a product.
    ///
    /// Returns the recorded relative path.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id (nothing
    /// is copied) and `StorefrontError::Image` if the copy fails.
    pub fn import_image(&mut self, id: &ProductId, source: &Path) -> Result<String, StorefrontError> {
        self.product(id)?;
        let recorded = self.images.import(source, &mut self.ids)?;
        self.catalog.set_product_image(id, recorded.clone());
        self.save_catalog();
        Ok(recorded)
    }

    // Shopping

    /// Put `quantity` units of a product in the cart and save the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id and
    /// `StorefrontError::OutOfStock` when stock is below `quantity`. A
    /// quantity of zero changes nothing.
    pub fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<(), StorefrontError> {
        if quantity == 0 {
            self.product(id)?;
            return Ok(());
        }
        if !CartService::new(&mut self.cart, &mut self.catalog).add_to_cart(id, quantity) {
            return Err(if self.catalog.find_by_id(id).is_some() {
                StorefrontError::OutOfStock(id.clone())
            } else {
                StorefrontError::ProductNotFound(id.clone())
            });
        }
        tracing::info!(product_id = %id, quantity, "Added to cart");
        self.save_cart();
        Ok(())
    }

    /// Put one unit in the cart.
    ///
    /// # Errors
    ///
    /// See [`add_to_cart`](Self::add_to_cart).
    pub fn add_one_to_cart(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        self.add_to_cart(id, 1)
    }

    /// Take one unit off a cart line, dropping the line when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` if the product is not in the cart.
    pub fn remove_one_from_cart(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        if self.cart.quantity_of(id) == 0 {
            return Err(StorefrontError::ProductNotFound(id.clone()));
        }
        CartService::new(&mut self.cart, &mut self.catalog).decrease_in_cart(id, 1);
        self.save_cart();
        Ok(())
    }

    /// Drop a whole cart line.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` if the product is not in the cart.
    pub fn drop_from_cart(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        if !CartService::new(&mut self.cart, &mut self.catalog).remove_from_cart(id) {
            return Err(StorefrontError::ProductNotFound(id.clone()));
        }
        self.save_cart();
        Ok(())
    }

    /// Cart total at current prices.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total_price(&self.catalog)
    }

    /// Buy the cart. Saves the catalog and the (now empty) cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` when the purchase is refused;
    /// stock and cart are unchanged then.
    pub fn checkout(&mut self) -> Result<Receipt, StorefrontError> {
        let receipt =
            CartService::new(&mut self.cart, &mut self.catalog).checkout(&self.products)?;
        tracing::info!(lines = receipt.lines.len(), total = %receipt.total, "Checkout complete");
        self.save_cart();
        Ok(receipt)
    }

    /// Save both files and close the store.
    pub fn shutdown(self) {
        self.save_catalog();
        self.save_cart();
        tracing::debug!("Store closed");
    }

    fn save_catalog(&self) {
        self.products.save(self.catalog.all_products());
    }

    fn save_cart(&self) {
        self.carts.save(&self.cart);
    }
}

/// Reject text that would break the one-record-per-line file format.
fn check_text(field: &'static str, value: &str) -> Result<(), StorefrontError> {
    if value.contains([';', '\n', '\r']) {
        return Err(StorefrontError::InvalidField { field });
    }
    Ok(())
}

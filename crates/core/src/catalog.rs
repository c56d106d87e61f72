//! The product catalog.
//!
//! [`ProductCatalog`] exclusively owns every [`Product`] and keeps them in
//! insertion order, which is also the order they are persisted and listed in.
//! Persistence goes through the [`CatalogStore`] trait so this crate stays
//! free of file I/O.

use crate::product::Product;
use crate::types::{Category, ProductId};

/// Somewhere a catalog can be loaded from and saved to.
pub trait CatalogStore {
    /// Error produced by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read every product, in stored order.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the products cannot be read.
    fn load_products(&self) -> Result<Vec<Product>, Self::Error>;

    /// Replace the stored catalog with `products`, in order.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the products cannot be written.
    fn save_products(&self, products: &[Product]) -> Result<(), Self::Error>;
}

/// Ordered collection of products keyed by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Append a product at the end of the catalog.
    pub fn add_product(&mut self, product: Product) {
        tracing::debug!(product_id = %product.id(), name = product.name(), "Adding product");
        self.products.push(product);
    }

    /// Remove the product with `id`, returning it. `None` if absent.
    pub fn remove_product_by_id(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    /// Look up a product. The returned reference is the catalog's own entry.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Mutable lookup; edits are visible to every later lookup.
    pub fn find_by_id_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// Mutable access to every product, in catalog order. Entries cannot be
    /// added or removed through this slice.
    pub fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Attach an image path to a product. Returns `false` if the id is unknown.
    pub fn set_product_image(&mut self, id: &ProductId, image_path: impl Into<String>) -> bool {
        match self.find_by_id_mut(id) {
            Some(product) => {
                product.set_image_path(Some(image_path.into()));
                true
            }
            None => false,
        }
    }

    /// Products matching `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &CatalogFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Replace the contents with whatever `store` holds.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the catalog is left unchanged in that case.
    pub fn load<S: CatalogStore>(&mut self, store: &S) -> Result<(), S::Error> {
        self.products = store.load_products()?;
        tracing::debug!(count = self.products.len(), "Catalog loaded");
        Ok(())
    }

    /// Hand the current products to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if saving fails.
    pub fn save<S: CatalogStore>(&self, store: &S) -> Result<(), S::Error> {
        store.save_products(&self.products)
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}

/// Name search plus optional category restriction, as used when browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    query: String,
    category: Option<Category>,
}

impl CatalogFilter {
    /// A filter that matches everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match names containing `query`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim().to_lowercase();
        self
    }

    /// Restrict to one category. `None` means all categories.
    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| product.category() != c) {
            return false;
        }

        self.query.is_empty() || product.name().to_lowercase().contains(&self.query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::product::NewProduct;
    use crate::types::SequentialIds;

    fn product(ids: &mut SequentialIds, name: &str, category: Category) -> Product {
        Product::create(
            ids,
            NewProduct {
                name: name.to_owned(),
                category,
                price: "1.00".parse().unwrap(),
                stock: 1,
                description: String::new(),
            },
        )
    }

    fn sample() -> ProductCatalog {
        let mut ids = SequentialIds::new("p");
        [
            product(&mut ids, "USB Cable", Category::Electronics),
            product(&mut ids, "Rust in Action", Category::Books),
            product(&mut ids, "Cable Knit Sweater", Category::Clothing),
        ]
        .into_iter()
        .collect()
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Vec<Product>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("store unavailable")]
    struct Unavailable;

    impl CatalogStore for MemoryStore {
        type Error = Unavailable;

        fn load_products(&self) -> Result<Vec<Product>, Self::Error> {
            Ok(self.saved.borrow().clone())
        }

        fn save_products(&self, products: &[Product]) -> Result<(), Self::Error> {
            *self.saved.borrow_mut() = products.to_vec();
            Ok(())
        }
    }

    struct BrokenStore;

    impl CatalogStore for BrokenStore {
        type Error = Unavailable;

        fn load_products(&self) -> Result<Vec<Product>, Self::Error> {
            Err(Unavailable)
        }

        fn save_products(&self, _: &[Product]) -> Result<(), Self::Error> {
            Err(Unavailable)
        }
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let catalog = sample();
        let names: Vec<_> = catalog.all_products().iter().map(Product::name).collect();
        assert_eq!(names, ["USB Cable", "Rust in Action", "Cable Knit Sweater"]);
    }

    #[test]
    fn test_find_by_id_returns_catalog_entry() {
        let mut catalog = sample();
        let id = ProductId::new("p-2");

        catalog.find_by_id_mut(&id).unwrap().set_stock(42);
        assert_eq!(catalog.find_by_id(&id).unwrap().stock(), 42);
        assert!(catalog.find_by_id(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_remove_product_by_id() {
        let mut catalog = sample();
        let removed = catalog.remove_product_by_id(&ProductId::new("p-1")).unwrap();
        assert_eq!(removed.name(), "USB Cable");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.remove_product_by_id(&ProductId::new("p-1")).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_set_product_image() {
        let mut catalog = sample();
        assert!(catalog.set_product_image(&ProductId::new("p-3"), "images/x.jpg"));
        assert_eq!(
            catalog.find_by_id(&ProductId::new("p-3")).unwrap().image_path(),
            Some("images/x.jpg")
        );
        assert!(!catalog.set_product_image(&ProductId::new("nope"), "images/y.jpg"));
    }

    #[test]
    fn test_filter_by_query_ignores_case() {
        let catalog = sample();
        let filter = CatalogFilter::all().with_query("  CABLE ");
        let names: Vec<_> = catalog.filter(&filter).map(Product::name).collect();
        assert_eq!(names, ["USB Cable", "Cable Knit Sweater"]);
    }

    #[test]
    fn test_filter_by_category_and_query() {
        let catalog = sample();
        let filter = CatalogFilter::all()
            .with_query("cable")
            .with_category(Some(Category::Clothing));
        let names: Vec<_> = catalog.filter(&filter).map(Product::name).collect();
        assert_eq!(names, ["Cable Knit Sweater"]);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let catalog = sample();
        assert_eq!(catalog.filter(&CatalogFilter::all()).count(), 3);
    }

    #[test]
    fn test_save_then_load_through_store() {
        let store = MemoryStore::default();
        sample().save(&store).unwrap();

        let mut catalog = ProductCatalog::new();
        catalog.load(&store).unwrap();
        assert_eq!(catalog, sample());
    }

    #[test]
    fn test_failed_load_leaves_catalog_untouched() {
        let mut catalog = sample();
        assert!(catalog.load(&BrokenStore).is_err());
        assert_eq!(catalog.len(), 3);
    }
}

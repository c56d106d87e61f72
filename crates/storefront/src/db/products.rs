//! Catalog file repository.

use std::path::{Path, PathBuf};

use shopping_mall_core::{CatalogStore, Category, NewProduct, Price, Product, ProductId};

use super::{FIELD_SEPARATOR, RepositoryError, read_if_exists, split_fields, write_lines};

const FIELD_COUNT: usize = 7;

/// Reads and writes the catalog as `id;name;category;price;stock;description;imagePath` lines.
#[derive(Debug, Clone)]
pub struct ProductFileRepository {
    path: PathBuf,
}

impl ProductFileRepository {
    /// Create a repository for the catalog file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every product in file order.
    ///
    /// A missing file is an empty catalog. Lines without exactly seven fields
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read,
    /// and `UnknownCategory`, `InvalidPrice` or `InvalidStock` for the first
    /// line whose fields do not parse.
    pub fn try_load(&self) -> Result<Vec<Product>, RepositoryError> {
        let Some(contents) = read_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "Catalog file not found, starting empty");
            return Ok(Vec::new());
        };

        let mut products = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if let Some(product) = parse_line(index + 1, line)? {
                products.push(product);
            }
        }

        tracing::info!(path = %self.path.display(), count = products.len(), "Catalog loaded");
        Ok(products)
    }

    /// Like [`try_load`](Self::try_load), but an unreadable file is logged
    /// and treated as an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns the parse errors of [`try_load`](Self::try_load); I/O errors
    /// are never returned.
    pub fn load(&self) -> Result<Vec<Product>, RepositoryError> {
        match self.try_load() {
            Err(error) if error.is_io() => {
                tracing::error!(%error, "Error loading products from file");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Overwrite the file with `products`, one line each, in order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be written.
    pub fn try_save(&self, products: &[Product]) -> Result<(), RepositoryError> {
        write_lines(&self.path, products.iter().map(format_line))?;
        tracing::debug!(path = %self.path.display(), count = products.len(), "Catalog saved");
        Ok(())
    }

    /// Like [`try_save`](Self::try_save), but failures are only logged.
    pub fn save(&self, products: &[Product]) {
        if let Err(error) = self.try_save(products) {
            tracing::error!(%error, "Error saving products to file");
        }
    }
}

impl CatalogStore for ProductFileRepository {
    type Error = RepositoryError;

    fn load_products(&self) -> Result<Vec<Product>, Self::Error> {
        self.load()
    }

    fn save_products(&self, products: &[Product]) -> Result<(), Self::Error> {
        self.try_save(products)
    }
}

fn format_line(product: &Product) -> String {
    let sep = FIELD_SEPARATOR;
    format!(
        "{id}{sep}{name}{sep}{category}{sep}{price}{sep}{stock}{sep}{description}{sep}{image}",
        id = product.id(),
        name = product.name(),
        category = product.category(),
        price = product.price(),
        stock = product.stock(),
        description = product.description(),
        image = product.image_path().unwrap_or_default(),
    )
}

/// Parse one catalog line. `Ok(None)` for lines with the wrong field count.
fn parse_line(line_no: usize, line: &str) -> Result<Option<Product>, RepositoryError> {
    let fields = split_fields(line);
    let [id, name, category, price, stock, description, image] = fields.as_slice() else {
        tracing::debug!(
            line = line_no,
            fields = fields.len(),
            expected = FIELD_COUNT,
            "Skipping malformed catalog line"
        );
        return Ok(None);
    };

    let category: Category = category
        .parse()
        .map_err(|_| RepositoryError::UnknownCategory {
            line: line_no,
            token: (*category).to_owned(),
        })?;
    let price: Price = price.parse().map_err(|_| RepositoryError::InvalidPrice {
        line: line_no,
        value: (*price).to_owned(),
    })?;
    let stock: u32 = stock.parse().map_err(|_| RepositoryError::InvalidStock {
        line: line_no,
        value: (*stock).to_owned(),
    })?;
    let image_path = Some(image.trim())
        .filter(|path| !path.is_empty())
        .map(ToOwned::to_owned);

    Ok(Some(Product::rehydrate(
        ProductId::new(*id),
        NewProduct {
            name: (*name).to_owned(),
            category,
            price,
            stock,
            description: (*description).to_owned(),
        },
        image_path,
    )))
}

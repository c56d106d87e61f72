//! Command implementations.
//!
//! Each command writes its result to the given output handle; errors go back
//! to `main`, which logs them.

pub mod admin;
pub mod customer;

use std::io::{self, Write};

use shopping_mall_core::Product;
use shopping_mall_storefront::StorefrontError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The store refused or failed the operation.
    #[error(transparent)]
    Store(#[from] StorefrontError),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Encoding `--json` output failed.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print products as a table, or as a JSON array.
fn write_products(
    out: &mut impl Write,
    products: &[&Product],
    json: bool,
) -> Result<(), CommandError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, products)?;
        writeln!(out)?;
        return Ok(());
    }

    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36}  {:<24}  {:<11}  {:>10}  {:>6}  IMAGE",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    )?;
    for product in products {
        writeln!(
            out,
            "{:<36}  {:<24}  {:<11}  {:>10}  {:>6}  {}",
            product.id(),
            product.name(),
            product.category(),
            product.price(),
            product.stock(),
            product.image_path().unwrap_or("-"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use shopping_mall_core::{Category, NewProduct, SequentialIds};
    use shopping_mall_storefront::{StoreConfig, Storefront};

    pub fn open(dir: &tempfile::TempDir) -> Storefront {
        Storefront::open_with_ids(&StoreConfig::in_dir(dir.path()), SequentialIds::new("p"))
            .unwrap()
    }

    pub fn product(name: &str, category: Category, price: &str, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            category,
            price: price.parse().unwrap(),
            stock,
            description: String::new(),
        }
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}

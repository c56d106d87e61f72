//! Catalog administration commands.
//!
//! # Usage
//!
//! ```bash
//! mall-cli -u admin -p admin4321 product add -n "Desk Lamp" -c general --price 19.99 -s 5
//! mall-cli -u admin -p admin4321 product edit <ID> --price 17.50
//! mall-cli -u admin -p admin4321 product image <ID> ~/lamp.png
//! mall-cli -u admin -p admin4321 product delete <ID>
//! mall-cli -u admin -p admin4321 product list --json
//! ```

use std::io::Write;
use std::path::Path;

use shopping_mall_core::{NewProduct, ProductId, ProductUpdate};
use shopping_mall_storefront::Storefront;

use super::{CommandError, write_products};

/// Add a product and print its new id.
pub fn add(
    store: &mut Storefront,
    out: &mut impl Write,
    fields: NewProduct,
) -> Result<(), CommandError> {
    let id = store.add_product(fields)?;
    writeln!(out, "Product added: {id}")?;
    Ok(())
}

/// Apply the given field changes to a product.
pub fn edit(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
    update: ProductUpdate,
) -> Result<(), CommandError> {
    if update.is_empty() {
        // Still an error for unknown ids.
        store.product(id)?;
        writeln!(out, "Nothing to change for {id}")?;
        return Ok(());
    }

    store.edit_product(id, update)?;
    writeln!(out, "Product updated: {id}")?;
    Ok(())
}

pub fn delete(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CommandError> {
    let removed = store.delete_product(id)?;
    writeln!(out, "Product deleted: {} ({id})", removed.name())?;
    Ok(())
}

/// Copy an image file into the store and attach it to a product.
pub fn image(
    store: &mut Storefront,
    out: &mut impl Write,
    id: &ProductId,
    file: &Path,
) -> Result<(), CommandError> {
    let recorded = store.import_image(id, file)?;
    writeln!(out, "Image set for {id}: {recorded}")?;
    Ok(())
}

/// Print the whole catalog.
pub fn list(store: &Storefront, out: &mut impl Write, json: bool) -> Result<(), CommandError> {
    let products: Vec<_> = store.catalog().all_products().iter().collect();
    write_products(out, &products, json)
}

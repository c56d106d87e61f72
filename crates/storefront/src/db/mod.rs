//! Flat-file persistence for the catalog and the cart.
//!
//! # Files
//!
//! Both files are semicolon-delimited text with no header row, one record
//! per line:
//!
//! - `products.csv` - `id;name;category;price;stock;description;imagePath`
//! - `cart.csv` - `productId;quantity`
//!
//! Every save rewrites the whole file from in-memory state. Reading is
//! tolerant of malformed lines (they are skipped), except that an unknown
//! category or an unparsable price or stock fails the whole catalog load.

pub mod cart;
pub mod products;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use cart::CartFileRepository;
pub use products::ProductFileRepository;

/// Field separator used by both files.
pub const FIELD_SEPARATOR: char = ';';

/// Errors from reading or writing the store files.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog line names a category that does not exist.
    #[error("line {line}: unknown category '{token}'")]
    UnknownCategory { line: usize, token: String },

    /// A catalog line has a price that is not a non-negative decimal.
    #[error("line {line}: invalid price '{value}'")]
    InvalidPrice { line: usize, value: String },

    /// A catalog line has a stock that is not a non-negative integer.
    #[error("line {line}: invalid stock '{value}'")]
    InvalidStock { line: usize, value: String },
}

impl RepositoryError {
    /// Whether this is an I/O failure rather than bad file contents.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Split a record into its fields.
///
/// Empty fields are kept, including trailing ones, so a product without an
/// image still has seven fields.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}

/// Read a whole file. `Ok(None)` when the file does not exist.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>, RepositoryError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace `path` with `lines`, one per line.
///
/// The writer lives only for this call and is flushed before returning, on
/// the error path as well as the success path.
pub(crate) fn write_lines<I>(path: &Path, lines: I) -> Result<(), RepositoryError>
where
    I: IntoIterator<Item = String>,
{
    let io_err = |source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    let written = lines
        .into_iter()
        .try_for_each(|line| writeln!(writer, "{line}"));
    let flushed = writer.flush();
    written.and(flushed).map_err(io_err)
}

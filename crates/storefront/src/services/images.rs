//! Product image storage.
//!
//! Images are copied into one directory under a freshly generated file name.
//! Products only remember the returned relative path; nothing here checks
//! later that the file still exists.

use std::path::{Path, PathBuf};

use shopping_mall_core::IdGenerator;
use thiserror::Error;

/// Errors that can occur while importing an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file to import does not exist or is not a regular file.
    #[error("image not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Creating the image directory or copying the file failed.
    #[error("failed to copy image to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory of imported product images.
#[derive(Debug, Clone)]
pub struct ImageLibrary {
    root: PathBuf,
    dir_name: String,
}

impl ImageLibrary {
    /// Images live in `root/dir_name`; recorded paths start with `dir_name/`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, dir_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dir_name: dir_name.into(),
        }
    }

    /// Absolute (or root-relative) directory holding the images.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.dir_name)
    }

    /// Where a recorded relative path points on disk.
    #[must_use]
    pub fn resolve(&self, recorded: &str) -> PathBuf {
        self.root.join(recorded)
    }

    /// Copy `source` into the library and return its relative path.
    ///
    /// The new file name is a generated id followed by the source's
    /// extension (from the last `.` of the file name, dot included). An
    /// extension containing `;` or a line break is dropped, since the
    /// recorded path must fit on one catalog line.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::SourceMissing` if `source` is not a file, and
    /// `ImageError::Io` if the directory cannot be created or the copy fails.
    pub fn import(&self, source: &Path, ids: &mut impl IdGenerator) -> Result<String, ImageError> {
        if !source.is_file() {
            return Err(ImageError::SourceMissing(source.to_path_buf()));
        }

        let dir = self.dir();
        std::fs::create_dir_all(&dir).map_err(|source| ImageError::Io {
            path: dir.clone(),
            source,
        })?;

        let file_name = format!("{}{}", ids.generate(), extension_of(source));
        let dest = dir.join(&file_name);
        std::fs::copy(source, &dest).map_err(|source| ImageError::Io {
            path: dest.clone(),
            source,
        })?;

        let recorded = format!("{}/{file_name}", self.dir_name);
        tracing::info!(source = %source.display(), path = %recorded, "Image imported");
        Ok(recorded)
    }
}

fn extension_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| {
            name.rfind('.')
                .and_then(|dot| name.get(dot..))
                .filter(|ext| !ext.contains([';', '\n', '\r']))
                .map(ToOwned::to_owned)
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopping_mall_core::SequentialIds;

    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("/tmp/photo.JPG")), ".JPG");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
        assert_eq!(extension_of(Path::new(".hidden")), ".hidden");
        assert_eq!(extension_of(Path::new("photo.p;ng")), "");
        assert_eq!(extension_of(Path::new("photo.p\nng")), "");
    }

    #[test]
    fn test_import_drops_unstorable_extension() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("photo.p;ng");
        std::fs::write(&source, b"png").unwrap();

        let library = ImageLibrary::new(root.path(), "images");
        let recorded = library
            .import(&source, &mut SequentialIds::new("img"))
            .unwrap();
        assert_eq!(recorded, "images/img-1");
        assert!(library.resolve(&recorded).is_file());
    }

    #[test]
    fn test_import_copies_under_generated_name() {
        let root = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("lamp.png");
        std::fs::write(&source, b"png bytes").unwrap();

        let library = ImageLibrary::new(root.path(), "images");
        let mut ids = SequentialIds::new("img");

        let recorded = library.import(&source, &mut ids).unwrap();
        assert_eq!(recorded, "images/img-1.png");
        assert_eq!(std::fs::read(library.resolve(&recorded)).unwrap(), b"png bytes");

        let second = library.import(&source, &mut ids).unwrap();
        assert_eq!(second, "images/img-2.png");
    }

    #[test]
    fn test_import_missing_source() {
        let root = tempfile::tempdir().unwrap();
        let library = ImageLibrary::new(root.path(), "images");
        let err = library
            .import(&root.path().join("nope.png"), &mut SequentialIds::new("img"))
            .unwrap_err();
        assert!(matches!(err, ImageError::SourceMissing(_)));
        assert!(!library.dir().exists());
    }

    #[test]
    fn test_import_fails_when_dir_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("images"), b"not a dir").unwrap();
        let source = root.path().join("a.jpg");
        std::fs::write(&source, b"jpg").unwrap();

        let library = ImageLibrary::new(root.path(), "images");
        let err = library
            .import(&source, &mut SequentialIds::new("img"))
            .unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));
    }
}

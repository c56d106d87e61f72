//! Product identity and identifier generation.
//!
//! A [`ProductId`] is assigned once, when a product is created, and never
//! changes afterwards. Generation is always injected through [`IdGenerator`]
//! so that callers (and tests) decide where identities come from.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, immutable identity of a catalog product.
///
/// Identities read back from disk are taken verbatim, so no particular shape
/// (UUID or otherwise) is enforced.
///
/// ```
/// use shopping_mall_core::ProductId;
///
/// let id: ProductId = "3f1c9a4e".parse().unwrap();
/// assert_eq!(id.as_str(), "3f1c9a4e");
/// assert_eq!(id.to_string(), "3f1c9a4e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh identities.
///
/// Also used for the unique file names of imported product images.
pub trait IdGenerator {
    /// Produce an identity that has not been handed out before.
    fn generate(&mut self) -> ProductId;
}

/// Random v4 UUIDs in lowercase hyphenated form. This is the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> ProductId {
        ProductId(Uuid::new_v4().to_string())
    }
}

/// Deterministic `"<prefix>-<n>"` identities, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator whose first identity is `"<prefix>-1"`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> ProductId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        ProductId(id)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn generate(&mut self) -> ProductId {
        (**self).generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self) -> ProductId {
        (**self).generate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_count_up() {
        let mut ids = SequentialIds::new("p");
        assert_eq!(ids.generate().as_str(), "p-1");
        assert_eq!(ids.generate().as_str(), "p-2");
        assert_eq!(ids.generate().as_str(), "p-3");
    }

    #[test]
    fn test_uuid_generator_produces_distinct_uuids() {
        let mut ids = UuidGenerator;
        let a = ids.generate();
        let b = ids.generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_keeps_legacy_ids_verbatim() {
        let id: ProductId = "not-a-uuid".parse().unwrap();
        assert_eq!(id.as_str(), "not-a-uuid");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_generator_through_mut_ref() {
        fn take(ids: &mut impl IdGenerator) -> ProductId {
            ids.generate()
        }
        let mut ids = SequentialIds::new("x");
        let mut borrowed = &mut ids;
        assert_eq!(take(&mut borrowed).as_str(), "x-1");
        assert_eq!(ids.generate().as_str(), "x-2");
    }
}

//! Product categories.

use serde::{Deserialize, Serialize};

/// Closed set of catalog categories.
///
/// The upper-case token (`ELECTRONICS`, `CLOTHING`, ...) is both the display
/// form and the persisted form; parsing it is exact and case sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Books,
    #[default]
    General,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::Food,
        Self::Books,
        Self::General,
    ];

    /// The persisted token for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "ELECTRONICS",
            Self::Clothing => "CLOTHING",
            Self::Food => "FOOD",
            Self::Books => "BOOKS",
            Self::General => "GENERAL",
        }
    }

    /// Parse free-form user input: surrounding whitespace is ignored and
    /// case does not matter.
    ///
    /// # Errors
    ///
    /// Returns an error message if the input names no category.
    pub fn parse_lenient(input: &str) -> Result<Self, String> {
        input.trim().to_uppercase().parse()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ELECTRONICS" => Ok(Self::Electronics),
            "CLOTHING" => Ok(Self::Clothing),
            "FOOD" => Ok(Self::Food),
            "BOOKS" => Ok(Self::Books),
            "GENERAL" => Ok(Self::General),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

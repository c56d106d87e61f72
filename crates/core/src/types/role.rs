//! Who is using the store.

use serde::{Deserialize, Serialize};

/// Role granted by a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Maintains the catalog: adds, edits and deletes products and images.
    Administrator,
    /// Browses the catalog, fills a cart and checks out.
    Customer,
}

impl Role {
    /// Whether this role may change the catalog directly.
    #[must_use]
    pub const fn manages_catalog(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Administrator),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Administrator, Role::Customer] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_only_admin_manages_catalog() {
        assert!(Role::Administrator.manages_catalog());
        assert!(!Role::Customer.manages_catalog());
    }
}

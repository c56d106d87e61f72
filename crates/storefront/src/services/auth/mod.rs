//! Authentication service.
//!
//! The store has exactly two fixed accounts, one per [`Role`]. There is no
//! registration, hashing or session handling.

mod error;

pub use error::AuthError;

use shopping_mall_core::Role;

/// Username of the built-in administrator account.
pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin4321";

/// Username of the built-in customer account.
pub const CUSTOMER_USERNAME: &str = "customer";
const CUSTOMER_PASSWORD: &str = "1234";

/// Checks credentials against the built-in accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthService;

impl AuthService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Log in and return the account's role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair matches no account.
    pub fn login(&self, username: &str, password: &str) -> Result<Role, AuthError> {
        let role = match (username, password) {
            (ADMIN_USERNAME, ADMIN_PASSWORD) => Role::Administrator,
            (CUSTOMER_USERNAME, CUSTOMER_PASSWORD) => Role::Customer,
            _ => {
                tracing::warn!(username, "Login failed");
                return Err(AuthError::InvalidCredentials);
            }
        };
        tracing::info!(username, %role, "Logged in");
        Ok(role)
    }

    /// Log in and require a specific role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a bad login and
    /// `AuthError::Forbidden` when the account has a different role.
    pub fn login_as(&self, username: &str, password: &str, required: Role) -> Result<Role, AuthError> {
        let role = self.login(username, password)?;
        if role != required {
            return Err(AuthError::Forbidden(role));
        }
        Ok(role)
    }
}

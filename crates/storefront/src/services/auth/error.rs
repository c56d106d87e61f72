//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The user is logged in but their role may not perform the operation.
    #[error("the {0} role is not allowed to do this")]
    Forbidden(shopping_mall_core::Role),
}

//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during identity and registration operations.
///
/// The session store itself reports login and registration outcomes as
/// booleans. These errors surface from the identity provider and from form
/// validation that runs before a registration is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] model_store_core::EmailError),

    /// Invalid credentials (wrong password, wrong role or unknown user).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
}

//! Unified error handling for store front-ends.
//!
//! The session store reports outcomes as booleans, so `AppError` is what a
//! front-end (the CLI, a UI shell) builds when it needs to turn a `false`
//! or a collaborator error into something it can show and log.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::SideStoreError;
use crate::services::auth::AuthError;
use crate::services::session::AccessDenied;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Side-store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] SideStoreError),

    /// Authentication or registration failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Caller lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(#[from] AccessDenied),

    /// No identity is signed in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Message safe to show to the person at the keyboard.
    ///
    /// Storage details are logged, not shown. Authentication failures never
    /// say which of email, password or role was wrong.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                "Could not access saved store data".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_string(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::PasswordMismatch => "Passwords do not match".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
            },
            Self::Forbidden(_) => "Administrator access required".to_string(),
            _ => self.to_string(),
        }
    }

    /// Process exit code for command-line front-ends.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Storage(_) | Self::Config(_) => 1,
            Self::BadRequest(_) | Self::NotFound(_) => 2,
            Self::Auth(_) | Self::Unauthorized(_) | Self::Forbidden(_) => 3,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order 42".to_string());
        assert_eq!(err.to_string(), "Not found: order 42");

        let err = AppError::from(AccessDenied);
        assert_eq!(err.to_string(), "Forbidden: administrator access required");
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = AppError::from(SideStoreError::InvalidKey("../etc".to_string()));
        assert_eq!(err.user_message(), "Could not access saved store data");

        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = AppError::from(AuthError::UserAlreadyExists);
        assert_eq!(
            err.user_message(),
            "An account with this email already exists"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::BadRequest("x".to_string()).exit_code(), 2);
        assert_eq!(AppError::from(AccessDenied).exit_code(), 3);
        assert_eq!(
            AppError::from(AuthError::PasswordMismatch).exit_code(),
            3
        );
    }
}

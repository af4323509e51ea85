//! Session commands: login, logout, whoami, register.

use model_store_core::Role;
use model_store_storefront::error::AppError;
use model_store_storefront::services::auth::{AuthError, validate_registration};

use super::CliStore;

/// Sign in, optionally requiring an administrator account.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the email, password or role
/// does not match.
pub fn login(store: &mut CliStore, email: &str, password: &str, admin: bool) -> Result<(), AppError> {
    let expected_role = admin.then_some(Role::Administrator);
    if !store.authenticate(email, password, expected_role) {
        return Err(AuthError::InvalidCredentials.into());
    }

    if let Some(identity) = store.current_identity() {
        tracing::info!("Signed in as {} <{}> ({})", identity.name, identity.email, identity.role);
    }
    Ok(())
}

/// Sign out.
pub fn logout(store: &mut CliStore) {
    store.end_session();
    tracing::info!("Signed out");
}

/// Show the signed-in identity.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if nobody is signed in.
pub fn whoami(store: &CliStore) -> Result<(), AppError> {
    let identity = store
        .current_identity()
        .ok_or_else(|| AppError::Unauthorized("nobody is signed in".to_string()))?;

    tracing::info!(
        "#{} {} <{}> ({})",
        identity.id,
        identity.name,
        identity.email,
        identity.role
    );
    Ok(())
}

/// Create a shopper account and sign in.
///
/// # Errors
///
/// Returns `AuthError` if the form is invalid or the email is taken.
pub fn register(
    store: &mut CliStore,
    email: &str,
    name: &str,
    password: &str,
    confirm: &str,
) -> Result<(), AppError> {
    model_store_core::Email::parse(email).map_err(AuthError::from)?;
    validate_registration(password, confirm)?;

    if !store.register(email, password, name) {
        return Err(AuthError::UserAlreadyExists.into());
    }

    tracing::info!("Registered and signed in as {name} <{email}>");
    tracing::warn!(
        "Accounts are held in memory only: the session is saved, but this account cannot be used with `login` in later runs"
    );
    Ok(())
}

//! Authentication service.
//!
//! Credentials are checked by an [`IdentityProvider`] injected into the
//! session store. The only provider is [`InMemoryIdentityProvider`]: a list of
//! accounts with plaintext secrets held in memory. It is a mock and performs
//! no hashing, rate limiting or lockout.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use model_store_core::{Role, UserId};

use crate::models::user::Identity;

/// Minimum password length accepted by [`validate_registration`].
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Source of identities and credential checks.
pub trait IdentityProvider {
    /// Return the identity whose email and secret both match exactly.
    ///
    /// Matching is case-sensitive. The returned identity carries no secret.
    fn verify(&self, email: &str, secret: &str) -> Option<Identity>;

    /// Whether an identity with exactly this email exists.
    fn contains(&self, email: &str) -> bool;

    /// Add a new identity with its secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is taken.
    fn insert(&mut self, identity: Identity, secret: SecretString) -> Result<Identity, AuthError>;

    /// Number of known identities.
    fn len(&self) -> usize;

    /// Whether no identities are known.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An identity together with its secret. Never leaves the provider.
#[derive(Debug)]
struct Account {
    identity: Identity,
    secret: SecretString,
}

/// Identity provider holding accounts in memory.
///
/// Accounts registered here are lost when the process exits; only the
/// signed-in identity is mirrored to the side-store.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Vec<Account>,
}

impl InMemoryIdentityProvider {
    /// Create a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider seeded with the two demo accounts:
    ///
    /// | Email | Password | Role | ID |
    /// |-------|----------|------|----|
    /// | `admin@store.com` | `admin123` | administrator | 1 |
    /// | `user@store.com` | `user123` | standard | 2 |
    #[must_use]
    pub fn with_demo_accounts() -> Self {
        let demo = [
            (1, "admin@store.com", "admin123", "Administrator", Role::Administrator),
            (2, "user@store.com", "user123", "Store User", Role::Standard),
        ];

        let accounts = demo
            .into_iter()
            .map(|(id, email, secret, name, role)| Account {
                identity: Identity {
                    id: UserId::new(id),
                    email: email.to_owned(),
                    name: name.to_owned(),
                    role,
                },
                secret: SecretString::from(secret),
            })
            .collect();

        Self { accounts }
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn verify(&self, email: &str, secret: &str) -> Option<Identity> {
        self.accounts
            .iter()
            .find(|account| {
                account.identity.email == email && account.secret.expose_secret() == secret
            })
            .map(|account| account.identity.clone())
    }

    fn contains(&self, email: &str) -> bool {
        self.accounts
            .iter()
            .any(|account| account.identity.email == email)
    }

    fn insert(&mut self, identity: Identity, secret: SecretString) -> Result<Identity, AuthError> {
        if self.contains(&identity.email) {
            return Err(AuthError::UserAlreadyExists);
        }
        self.accounts.push(Account {
            identity: identity.clone(),
            secret,
        });
        Ok(identity)
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

/// Check a registration form before calling
/// [`SessionStore::register`](crate::SessionStore::register).
///
/// # Errors
///
/// Returns `AuthError::PasswordMismatch` if the confirmation differs and
/// `AuthError::WeakPassword` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_registration(password: &str, confirmation: &str) -> Result<(), AuthError> {
    if password != confirmation {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(id: i64, email: &str) -> Identity {
        Identity {
            id: UserId::new(id),
            email: email.to_owned(),
            name: "Test".to_owned(),
            role: Role::Standard,
        }
    }

    #[test]
    fn test_demo_accounts_verify() {
        let provider = InMemoryIdentityProvider::with_demo_accounts();
        assert_eq!(provider.len(), 2);

        let admin = provider.verify("admin@store.com", "admin123").unwrap();
        assert_eq!(admin.role, Role::Administrator);
        assert_eq!(admin.id, UserId::new(1));

        let user = provider.verify("user@store.com", "user123").unwrap();
        assert_eq!(user.role, Role::Standard);
    }

    #[test]
    fn test_verify_requires_exact_match() {
        let provider = InMemoryIdentityProvider::with_demo_accounts();
        assert!(provider.verify("user@store.com", "user1234").is_none());
        assert!(provider.verify("User@store.com", "user123").is_none());
        assert!(provider.verify("user@store.com", "USER123").is_none());
        assert!(provider.verify("nobody@store.com", "user123").is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_email() {
        let mut provider = InMemoryIdentityProvider::new();
        assert!(provider.is_empty());

        provider
            .insert(identity(10, "alice@example.com"), SecretString::from("secret1"))
            .unwrap();
        let err = provider
            .insert(identity(11, "alice@example.com"), SecretString::from("other"))
            .unwrap_err();

        assert_eq!(err, AuthError::UserAlreadyExists);
        assert_eq!(provider.len(), 1);
        assert!(provider.verify("alice@example.com", "secret1").is_some());
        assert!(provider.verify("alice@example.com", "other").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let provider = InMemoryIdentityProvider::with_demo_accounts();
        let debug = format!("{provider:?}");
        assert!(debug.contains("admin@store.com"));
        assert!(!debug.contains("admin123"));
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("secret1", "secret1").is_ok());
        assert_eq!(
            validate_registration("secret1", "secret2"),
            Err(AuthError::PasswordMismatch)
        );
        assert!(matches!(
            validate_registration("abc", "abc"),
            Err(AuthError::WeakPassword(_))
        ));
    }
}

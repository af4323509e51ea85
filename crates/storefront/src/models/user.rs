//! Identity domain type.

use serde::{Deserialize, Serialize};

use model_store_core::{Role, UserId};

/// A registered shopper or administrator, as seen by callers.
///
/// Carries no credential: secrets stay inside the identity provider, so any
/// `Identity` handed out or persisted is already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity ID.
    pub id: UserId,
    /// Login email, unique across identities. Compared exactly as entered.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role used for access checks.
    pub role: Role,
}

impl Identity {
    /// Whether this identity may see every order.
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

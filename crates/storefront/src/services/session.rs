//! Session store: the signed-in identity and the order collection.
//!
//! The store owns both pieces of state and mirrors them into a
//! [`SideStore`] after every mutation, writing each value whole. The
//! side-store is only a mirror: in-memory state is authoritative until the
//! next [`SessionStore::open`].
//!
//! No operation panics or returns an error for ordinary failures. A wrong
//! password, a duplicate registration or an unknown order ID is reported as
//! `false` / `None`; side-store failures are logged and swallowed. The one
//! exception is [`SessionStore::all_orders`], which returns [`AccessDenied`]
//! to anyone but an administrator.

use chrono::Utc;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use model_store_core::{OrderId, OrderStatus, Role, UserId};

use crate::db::SideStore;
use crate::models::order::demo_orders;
use crate::models::session::keys;
use crate::models::{Identity, LineItem, Order, ShippingContact, StatusSummary};
use crate::services::auth::IdentityProvider;
use crate::services::ids::IdAllocator;

/// Returned by [`SessionStore::all_orders`] when the caller is not signed in
/// as an administrator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("administrator access required")]
pub struct AccessDenied;

/// Startup options for [`SessionStore::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Start with the demo orders when the side-store holds no orders.
    pub seed_demo_orders: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed_demo_orders: true,
        }
    }
}

/// Signed-in identity and order collection, mirrored into a side-store.
#[derive(Debug)]
pub struct SessionStore<S, P> {
    side_store: S,
    identities: P,
    current: Option<Identity>,
    orders: Vec<Order>,
    ids: IdAllocator,
}

impl<S: SideStore, P: IdentityProvider> SessionStore<S, P> {
    /// Rehydrate a store from `side_store`.
    ///
    /// The signed-in identity and the order collection are read
    /// independently. A missing, unreadable or unparseable value is replaced
    /// by its default: nobody signed in, and either the demo orders or an
    /// empty list depending on `options`.
    pub fn open(side_store: S, identities: P, options: &StoreOptions) -> Self {
        let current: Option<Identity> = load(&side_store, keys::CURRENT_USER);
        let orders = load(&side_store, keys::ORDERS).unwrap_or_else(|| {
            if options.seed_demo_orders {
                demo_orders()
            } else {
                Vec::new()
            }
        });

        let mut ids = IdAllocator::new();
        for order in &orders {
            ids.observe(order.id().as_i64());
        }
        if let Some(identity) = &current {
            ids.observe(identity.id.as_i64());
        }

        tracing::debug!(
            signed_in = current.is_some(),
            orders = orders.len(),
            "Session store opened"
        );

        Self {
            side_store,
            identities,
            current,
            orders,
            ids,
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in with an exact, case-sensitive email and secret match.
    ///
    /// When `expected_role` is given the identity must also have that role,
    /// so the admin login form rejects shoppers and vice versa. Returns
    /// `false` and leaves the session untouched on any mismatch.
    pub fn authenticate(&mut self, email: &str, secret: &str, expected_role: Option<Role>) -> bool {
        let identity = self
            .identities
            .verify(email, secret)
            .filter(|identity| expected_role.is_none_or(|role| identity.role == role));

        let Some(identity) = identity else {
            tracing::info!("Authentication failed");
            return false;
        };

        tracing::info!(user_id = %identity.id, role = %identity.role, "Authenticated");
        self.begin_session(identity);
        true
    }

    /// Create a standard identity and sign it in.
    ///
    /// Returns `false` if the email is already registered (exact match).
    /// Any other string is accepted as an email.
    pub fn register(&mut self, email: &str, secret: &str, display_name: &str) -> bool {
        if self.identities.contains(email) {
            tracing::info!("Registration rejected: email already registered");
            return false;
        }

        let identity = Identity {
            id: UserId::new(self.ids.allocate()),
            email: email.to_owned(),
            name: display_name.to_owned(),
            role: Role::Standard,
        };

        match self.identities.insert(identity, SecretString::from(secret)) {
            Ok(identity) => {
                tracing::info!(user_id = %identity.id, "Registered");
                self.begin_session(identity);
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "Registration rejected");
                false
            }
        }
    }

    /// Sign out. Orders are kept.
    pub fn end_session(&mut self) {
        if let Some(identity) = self.current.take() {
            tracing::info!(user_id = %identity.id, "Session ended");
        }
        if let Err(e) = self.side_store.remove(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    fn begin_session(&mut self, identity: Identity) {
        persist(&mut self.side_store, keys::CURRENT_USER, &identity);
        self.current = Some(identity);
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order for the signed-in identity.
    ///
    /// The total is the sum of the line item prices and the status starts as
    /// pending. Returns the new order ID, or `None` without doing anything
    /// when nobody is signed in or the total overflows.
    pub fn create_order(
        &mut self,
        line_items: Vec<LineItem>,
        shipping_contact: ShippingContact,
    ) -> Option<OrderId> {
        let Some(owner_id) = self.current.as_ref().map(|identity| identity.id) else {
            tracing::debug!("Order not created: nobody signed in");
            return None;
        };

        let now = Utc::now();
        let id = OrderId::new(self.ids.allocate_at(now));
        let Some(order) = Order::place(id, owner_id, line_items, shipping_contact, now) else {
            tracing::warn!(user_id = %owner_id, "Order not created: total overflows");
            return None;
        };

        tracing::info!(
            order_id = %id,
            user_id = %owner_id,
            items = order.line_items().len(),
            total = %order.total(),
            "Order created"
        );

        self.orders.push(order);
        persist(&mut self.side_store, keys::ORDERS, &self.orders);
        Some(id)
    }

    /// Overwrite the status of an order.
    ///
    /// Any status may replace any other. Returns `false` and persists
    /// nothing when `order_id` is unknown.
    pub fn set_order_status(&mut self, order_id: OrderId, status: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|order| order.id() == order_id) else {
            tracing::debug!(order_id = %order_id, "Status not updated: unknown order");
            return false;
        };

        let previous = order.status();
        order.set_status(status);
        tracing::info!(order_id = %order_id, from = %previous, to = %status, "Order status updated");

        persist(&mut self.side_store, keys::ORDERS, &self.orders);
        true
    }

    /// Orders placed by the signed-in identity, oldest first. Empty when
    /// nobody is signed in.
    #[must_use]
    pub fn orders_for_current_user(&self) -> Vec<Order> {
        let Some(identity) = &self.current else {
            return Vec::new();
        };
        self.orders
            .iter()
            .filter(|order| order.owner_id() == identity.id)
            .cloned()
            .collect()
    }

    /// Per-status counts of the signed-in identity's orders.
    #[must_use]
    pub fn status_summary_for_current_user(&self) -> StatusSummary {
        match &self.current {
            Some(identity) => StatusSummary::from_orders(
                self.orders
                    .iter()
                    .filter(|order| order.owner_id() == identity.id),
            ),
            None => StatusSummary::default(),
        }
    }

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` unless an administrator is signed in.
    pub fn all_orders(&self) -> Result<&[Order], AccessDenied> {
        match &self.current {
            Some(identity) if identity.is_administrator() => Ok(&self.orders),
            _ => Err(AccessDenied),
        }
    }

    /// Look up an order by ID regardless of owner.
    #[must_use]
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == order_id)
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// The identity provider.
    #[must_use]
    pub const fn identities(&self) -> &P {
        &self.identities
    }

    /// The side-store mirror.
    #[must_use]
    pub const fn side_store(&self) -> &S {
        &self.side_store
    }

    /// Consume the store, returning the side-store.
    #[must_use]
    pub fn into_side_store(self) -> S {
        self.side_store
    }
}

/// Read and decode a side-store value, treating any failure as absent.
fn load<T: DeserializeOwned>(side_store: &impl SideStore, key: &str) -> Option<T> {
    let raw = match side_store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read side-store, using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unparseable side-store value");
            None
        }
    }
}

/// Encode and write a side-store value. Failures are logged, not returned.
fn persist<T: Serialize + ?Sized>(side_store: &mut impl SideStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(|e| e.to_string())
        .and_then(|raw| side_store.set(key, &raw).map_err(|e| e.to_string()));

    if let Err(error) = result {
        tracing::warn!(key, %error, "Failed to persist to side-store");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use model_store_core::{ItemId, Price};

    use super::*;
    use crate::db::{MemorySideStore, SideStoreError};
    use crate::services::auth::InMemoryIdentityProvider;

    type TestStore = SessionStore<MemorySideStore, InMemoryIdentityProvider>;

    fn demo_store() -> TestStore {
        SessionStore::open(
            MemorySideStore::new(),
            InMemoryIdentityProvider::with_demo_accounts(),
            &StoreOptions::default(),
        )
    }

    fn item(id: i64, cents: i64) -> LineItem {
        LineItem {
            id: ItemId::new(id),
            name: format!("Model {id}"),
            price: Price::from_cents(cents),
            image: format!("/img/{id}.jpg"),
        }
    }

    fn contact() -> ShippingContact {
        ShippingContact {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            phone: "+1 555 0100".to_owned(),
            address: "1 Main St".to_owned(),
        }
    }

    /// Side-store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlySideStore(MemorySideStore);

    impl SideStore for ReadOnlySideStore {
        fn get(&self, key: &str) -> Result<Option<String>, SideStoreError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), SideStoreError> {
            Err(SideStoreError::InvalidKey(key.to_owned()))
        }

        fn remove(&mut self, key: &str) -> Result<(), SideStoreError> {
            Err(SideStoreError::InvalidKey(key.to_owned()))
        }
    }

    // -------------------------------------------------------------------------
    // Startup
    // -------------------------------------------------------------------------

    #[test]
    fn test_open_empty_side_store_uses_defaults() {
        let store = demo_store();
        assert!(store.current_identity().is_none());
        assert_eq!(store.orders.len(), 1);
        assert_eq!(store.orders[0].status(), OrderStatus::Processing);
    }

    #[test]
    fn test_open_without_demo_orders() {
        let store = SessionStore::open(
            MemorySideStore::new(),
            InMemoryIdentityProvider::new(),
            &StoreOptions {
                seed_demo_orders: false,
            },
        );
        assert!(store.orders.is_empty());
    }

    #[test]
    fn test_open_discards_corrupt_values() {
        let side_store = MemorySideStore::with_entries([
            (keys::CURRENT_USER, "{\"id\": \"nope\"}"),
            (keys::ORDERS, "not json"),
        ]);
        let store = SessionStore::open(
            side_store,
            InMemoryIdentityProvider::with_demo_accounts(),
            &StoreOptions::default(),
        );

        assert!(store.current_identity().is_none());
        assert_eq!(store.orders, demo_orders());
    }

    #[test]
    fn test_open_keeps_persisted_empty_order_list() {
        let side_store = MemorySideStore::with_entries([(keys::ORDERS, "[]")]);
        let store = SessionStore::open(
            side_store,
            InMemoryIdentityProvider::with_demo_accounts(),
            &StoreOptions::default(),
        );
        assert!(store.orders.is_empty());
    }

    #[test]
    fn test_reopen_restores_session_and_orders() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));
        let order_id = store.create_order(vec![item(2, 2499)], contact()).unwrap();

        let reopened = SessionStore::open(
            store.into_side_store(),
            InMemoryIdentityProvider::with_demo_accounts(),
            &StoreOptions::default(),
        );

        assert_eq!(reopened.current_identity().unwrap().email.as_str(), "user@store.com");
        assert_eq!(reopened.orders_for_current_user().len(), 2);
        assert_eq!(reopened.order(order_id).unwrap().total(), Price::from_cents(2499));
    }

    // -------------------------------------------------------------------------
    // Authentication
    // -------------------------------------------------------------------------

    #[test]
    fn test_authenticate_persists_stripped_identity() {
        let mut store = demo_store();
        assert!(store.authenticate("admin@store.com", "admin123", Some(Role::Administrator)));

        let raw = store.side_store().get(keys::CURRENT_USER).unwrap().unwrap();
        assert!(!raw.contains("admin123"));
        let persisted: Identity = serde_json::from_str(&raw).unwrap();
        assert_eq!(Some(&persisted), store.current_identity());
    }

    #[test]
    fn test_authenticate_wrong_secret_keeps_session() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));
        let before = store.current_identity().cloned();

        assert!(!store.authenticate("admin@store.com", "wrong", None));
        assert_eq!(store.current_identity().cloned(), before);
    }

    #[test]
    fn test_authenticate_enforces_expected_role() {
        let mut store = demo_store();
        assert!(!store.authenticate("user@store.com", "user123", Some(Role::Administrator)));
        assert!(store.current_identity().is_none());
        assert!(!store.side_store().contains_key(keys::CURRENT_USER));

        assert!(!store.authenticate("admin@store.com", "admin123", Some(Role::Standard)));
        assert!(store.authenticate("user@store.com", "user123", Some(Role::Standard)));
    }

    #[test]
    fn test_register_then_authenticate() {
        let mut store = demo_store();
        assert!(store.register("alice@example.com", "secret1", "Alice"));
        let alice = store.current_identity().unwrap().clone();
        assert_eq!(alice.role, Role::Standard);
        assert_eq!(alice.name, "Alice");

        store.end_session();
        assert!(store.authenticate("alice@example.com", "secret1", None));
        assert_eq!(store.current_identity(), Some(&alice));
    }

    #[test]
    fn test_register_duplicate_leaves_identities_unchanged() {
        let mut store = demo_store();
        let before = store.identities().len();

        assert!(!store.register("user@store.com", "whatever", "Impostor"));
        assert_eq!(store.identities().len(), before);
        assert!(store.current_identity().is_none());
    }

    #[test]
    fn test_register_is_case_sensitive() {
        let mut store = demo_store();
        assert!(store.register("User@store.com", "secret1", "Other"));
        assert_eq!(store.identities().len(), 3);
    }

    #[test]
    fn test_register_accepts_any_unused_email() {
        let mut store = demo_store();
        assert!(store.register("bob", "secret1", "Bob"));
        assert_eq!(store.identities().len(), 3);

        store.end_session();
        assert!(store.authenticate("bob", "secret1", None));
        assert_eq!(store.current_identity().unwrap().name, "Bob");
        assert!(!store.register("bob", "other", "Bob Again"));
    }

    #[test]
    fn test_end_session_clears_persisted_identity_only() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));
        store.create_order(vec![item(1, 1299)], contact()).unwrap();

        store.end_session();
        assert!(store.current_identity().is_none());
        assert!(!store.side_store().contains_key(keys::CURRENT_USER));
        assert!(store.side_store().contains_key(keys::ORDERS));
        assert!(store.orders_for_current_user().is_empty());
        assert_eq!(store.orders.len(), 2);
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_order_without_session_is_noop() {
        let mut store = demo_store();
        assert_eq!(store.create_order(vec![item(1, 1299)], contact()), None);
        assert_eq!(store.orders.len(), 1);
        assert!(!store.side_store().contains_key(keys::ORDERS));
    }

    #[test]
    fn test_create_order_with_overflowing_total_is_rejected() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));

        let mut huge = item(1, 0);
        huge.price = "79228162514264337593543950335".parse().unwrap();
        assert_eq!(store.create_order(vec![huge, item(2, 100)], contact()), None);

        assert_eq!(store.orders.len(), 1);
        assert!(!store.side_store().contains_key(keys::ORDERS));
    }

    #[test]
    fn test_create_order_appends_pending_order() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));
        let before = store.orders_for_current_user().len();

        let id = store
            .create_order(vec![item(1, 1000), item(2, 500)], contact())
            .unwrap();

        let mine = store.orders_for_current_user();
        assert_eq!(mine.len(), before + 1);
        let order = mine.last().unwrap();
        assert_eq!(order.id(), id);
        assert_eq!(order.total(), Price::from_cents(1500));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.owner_id(), UserId::new(2));
        assert_eq!(order.shipping_contact(), &contact());

        let persisted: Vec<Order> =
            serde_json::from_str(&store.side_store().get(keys::ORDERS).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, store.orders);
    }

    #[test]
    fn test_rapid_orders_get_distinct_ids() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));

        let ids: Vec<OrderId> = (0..20)
            .map(|_| store.create_order(vec![item(4, 899)], contact()).unwrap())
            .collect();

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_set_order_status_changes_only_status() {
        let mut store = demo_store();
        assert!(store.authenticate("user@store.com", "user123", None));
        let target = store.create_order(vec![item(3, 1850)], contact()).unwrap();
        let before = store.orders.clone();

        assert!(store.set_order_status(target, OrderStatus::Shipped));

        for (old, new) in before.iter().zip(&store.orders) {
            if old.id() == target {
                assert_eq!(new.status(), OrderStatus::Shipped);
                assert_eq!(new.total(), old.total());
                assert_eq!(new.line_items(), old.line_items());
                assert_eq!(new.shipping_contact(), old.shipping_contact());
                assert_eq!(new.created_at(), old.created_at());
                assert_eq!(new.owner_id(), old.owner_id());
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_set_order_status_allows_any_transition() {
        let mut store = demo_store();
        let id = OrderId::new(1);
        assert!(store.set_order_status(id, OrderStatus::Delivered));
        assert!(store.set_order_status(id, OrderStatus::Pending));
        assert_eq!(store.order(id).unwrap().status(), OrderStatus::Pending);
    }

    #[test]
    fn test_set_order_status_unknown_id_is_noop() {
        let mut store = demo_store();
        let before = store.orders.clone();

        assert!(!store.set_order_status(OrderId::new(999), OrderStatus::Cancelled));
        assert_eq!(store.orders, before);
        assert!(!store.side_store().contains_key(keys::ORDERS));
    }

    #[test]
    fn test_orders_are_scoped_to_owner() {
        let mut store = demo_store();
        assert!(store.register("alice@example.com", "secret1", "Alice"));
        assert!(store.orders_for_current_user().is_empty());

        store.create_order(vec![item(5, 3299)], contact()).unwrap();
        assert_eq!(store.orders_for_current_user().len(), 1);

        assert!(store.authenticate("user@store.com", "user123", None));
        let mine = store.orders_for_current_user();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id(), OrderId::new(1));
    }

    #[test]
    fn test_status_summary_for_current_user() {
        let mut store = demo_store();
        assert_eq!(store.status_summary_for_current_user().total(), 0);

        assert!(store.authenticate("user@store.com", "user123", None));
        store.create_order(vec![item(6, 1599)], contact()).unwrap();

        let summary = store.status_summary_for_current_user();
        assert_eq!(summary.count(OrderStatus::Processing), 1);
        assert_eq!(summary.count(OrderStatus::Pending), 1);
        assert_eq!(summary.total(), 2);
    }

    // -------------------------------------------------------------------------
    // Access control
    // -------------------------------------------------------------------------

    #[test]
    fn test_all_orders_requires_administrator() {
        let mut store = demo_store();
        assert_eq!(store.all_orders(), Err(AccessDenied));

        assert!(store.authenticate("user@store.com", "user123", None));
        assert_eq!(store.all_orders(), Err(AccessDenied));

        assert!(store.authenticate("admin@store.com", "admin123", Some(Role::Administrator)));
        assert_eq!(store.all_orders().unwrap().len(), 1);
    }

    // -------------------------------------------------------------------------
    // Side-store failures
    // -------------------------------------------------------------------------

    #[test]
    fn test_write_failures_do_not_affect_memory_state() {
        let mut store = SessionStore::open(
            ReadOnlySideStore::default(),
            InMemoryIdentityProvider::with_demo_accounts(),
            &StoreOptions::default(),
        );

        assert!(store.authenticate("user@store.com", "user123", None));
        let id = store.create_order(vec![item(1, 1299)], contact()).unwrap();
        assert!(store.set_order_status(id, OrderStatus::Processing));
        assert_eq!(store.orders_for_current_user().len(), 2);

        store.end_session();
        assert!(store.current_identity().is_none());
    }
}

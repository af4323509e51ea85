//! Integration tests for Model Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p model-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Register, sign in, order and ship through one store
//! - `persistence` - Reopening stores over the file and memory side-stores
//!
//! No external services are needed: file-backed tests run in a temporary
//! directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use model_store_core::Price;
use model_store_storefront::SessionStore;
use model_store_storefront::StoreOptions;
use model_store_storefront::db::{FileSideStore, MemorySideStore, SideStoreError};
use model_store_storefront::models::{LineItem, ShippingContact};
use model_store_storefront::services::auth::InMemoryIdentityProvider;

/// Store over a data directory with the demo accounts.
pub type FileStore = SessionStore<FileSideStore, InMemoryIdentityProvider>;

/// Store over an in-memory side-store with the demo accounts.
pub type MemoryStore = SessionStore<MemorySideStore, InMemoryIdentityProvider>;

/// Open a store over `dir` without demo orders.
///
/// # Errors
///
/// Returns `SideStoreError` if `dir` cannot be created.
pub fn open_file_store(dir: &Path) -> Result<FileStore, SideStoreError> {
    Ok(SessionStore::open(
        FileSideStore::open(dir)?,
        InMemoryIdentityProvider::with_demo_accounts(),
        &empty_start(),
    ))
}

/// Open a store over `side_store` without demo orders.
#[must_use]
pub fn open_memory_store(side_store: MemorySideStore) -> MemoryStore {
    SessionStore::open(
        side_store,
        InMemoryIdentityProvider::with_demo_accounts(),
        &empty_start(),
    )
}

/// Options that start with no orders when none are persisted.
#[must_use]
pub const fn empty_start() -> StoreOptions {
    StoreOptions {
        seed_demo_orders: false,
    }
}

/// Line item with a price in cents.
#[must_use]
pub fn line_item(id: i64, name: &str, cents: i64) -> LineItem {
    LineItem {
        id: model_store_core::ItemId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        image: String::new(),
    }
}

/// Shipping contact for `name`.
#[must_use]
pub fn contact(name: &str, email: &str) -> ShippingContact {
    ShippingContact {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1 555 0100".to_string(),
        address: "1 Main St".to_string(),
    }
}

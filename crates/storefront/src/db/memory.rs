//! In-memory side-store.

use std::collections::HashMap;

use super::{SideStore, SideStoreError};

/// Side-store backed by a `HashMap`. Contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySideStore {
    entries: HashMap<String, String>,
}

impl MemorySideStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl SideStore for MemorySideStore {
    fn get(&self, key: &str) -> Result<Option<String>, SideStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SideStoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SideStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

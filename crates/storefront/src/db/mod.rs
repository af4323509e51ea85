//! Durable key-value side-store.
//!
//! The session store mirrors its state into a string-valued key-value store
//! after every mutation and reads it back at startup. Two backends exist:
//!
//! - [`MemorySideStore`] - process-local map, used by tests and by callers
//!   that do not need durability
//! - [`FileSideStore`] - one JSON file per key in a data directory
//!
//! Values are written and read whole. There is no schema version and no
//! migration path: a value that no longer parses is treated as absent by the
//! session store.

mod file;
mod memory;

pub use file::FileSideStore;
pub use memory::MemorySideStore;

/// Errors returned by side-store backends.
#[derive(Debug, thiserror::Error)]
pub enum SideStoreError {
    /// Filesystem operation failed.
    #[error("io error on key {key}: {source}")]
    Io {
        /// Key being read or written.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Data directory could not be created.
    #[error("cannot create data directory {}: {source}", .path.display())]
    DataDir {
        /// Directory that was requested.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// String-valued key-value storage.
pub trait SideStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SideStoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SideStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `SideStoreError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SideStoreError>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SideStoreError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), SideStoreError>;
}

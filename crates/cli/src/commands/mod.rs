//! Command implementations.

pub mod catalog;
pub mod orders;
pub mod session;

use std::path::PathBuf;

use model_store_storefront::config::StoreConfig;
use model_store_storefront::db::FileSideStore;
use model_store_storefront::error::AppError;
use model_store_storefront::services::auth::InMemoryIdentityProvider;
use model_store_storefront::SessionStore;

/// Session store backed by the data directory.
pub type CliStore = SessionStore<FileSideStore, InMemoryIdentityProvider>;

/// Load configuration and open the session store.
///
/// `data_dir` overrides the configured directory.
///
/// # Errors
///
/// Returns `AppError::Config` if the environment is invalid and
/// `AppError::Storage` if the data directory cannot be created.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<CliStore, AppError> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    open_with_config(&config)
}

/// Open the session store described by `config`.
///
/// # Errors
///
/// Returns `AppError::Storage` if the data directory cannot be created.
pub fn open_with_config(config: &StoreConfig) -> Result<CliStore, AppError> {
    let side_store = FileSideStore::open(&config.data_dir)?;
    let identities = if config.demo_accounts {
        InMemoryIdentityProvider::with_demo_accounts()
    } else {
        InMemoryIdentityProvider::new()
    };

    tracing::debug!(data_dir = %config.data_dir.display(), "Opening session store");
    Ok(SessionStore::open(
        side_store,
        identities,
        &config.store_options(),
    ))
}

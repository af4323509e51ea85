//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MODEL_STORE_DATA_DIR` - Side-store directory (default: `.model-store`)
//! - `MODEL_STORE_SEED_DEMO_ORDERS` - Start with demo orders when none are
//!   persisted (default: true)
//! - `MODEL_STORE_DEMO_ACCOUNTS` - Seed the demo admin and shopper accounts
//!   (default: true)
//!
//! Boolean values accept `true/false`, `1/0`, `yes/no` and `on/off`.

use std::path::PathBuf;

use thiserror::Error;

use crate::services::session::StoreOptions;

const DEFAULT_DATA_DIR: &str = ".model-store";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the side-store files
    pub data_dir: PathBuf,
    /// Seed demo orders when the side-store has none
    pub seed_demo_orders: bool,
    /// Seed the demo identity accounts
    pub demo_accounts: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_demo_orders: true,
            demo_accounts: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean variable has an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean variable has an unrecognized value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("MODEL_STORE_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let seed_demo_orders = get_bool(
            &lookup,
            "MODEL_STORE_SEED_DEMO_ORDERS",
            defaults.seed_demo_orders,
        )?;
        let demo_accounts = get_bool(&lookup, "MODEL_STORE_DEMO_ACCOUNTS", defaults.demo_accounts)?;

        Ok(Self {
            data_dir,
            seed_demo_orders,
            demo_accounts,
        })
    }

    /// Session store options derived from this configuration.
    #[must_use]
    pub const fn store_options(&self) -> StoreOptions {
        StoreOptions {
            seed_demo_orders: self.seed_demo_orders,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a boolean variable, falling back to `default` when unset.
fn get_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        Some(value) => parse_bool(&value).ok_or_else(|| {
            ConfigError::InvalidEnvVar(key.to_string(), format!("expected a boolean, got '{value}'"))
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

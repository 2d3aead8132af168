//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `INVENTORY_API_URL` - Base URL of the inventory service (default: http://localhost:3333)
//! - `CART_STORAGE_DIR` - Directory holding the cart snapshot (default: .rocketshoes)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_INVENTORY_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Inventory service configuration
    pub inventory: InventoryConfig,
    /// Directory holding the persisted cart snapshot
    pub storage_dir: PathBuf,
}

/// Inventory service configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it
    pub base_url: Url,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let inventory = InventoryConfig::from_env()?;
        let storage_dir = PathBuf::from(get_env_or_default("CART_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        if storage_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            inventory,
            storage_dir,
        })
    }
}

impl InventoryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("INVENTORY_API_URL", DEFAULT_INVENTORY_API_URL);
        Ok(Self {
            base_url: parse_base_url("INVENTORY_API_URL", &raw)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an http(s) base URL.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

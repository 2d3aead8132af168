//! CLI command implementations.

pub mod cart;

use rocketshoes_cart::{CartError, ConfigError, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persisted cart could not be opened.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StoreError),

    /// The cart rejected the operation (already shown to the user).
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

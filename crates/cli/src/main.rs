//! RocketShoes CLI - Drive the shopping cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! rs-cart show
//!
//! # Add one unit of product 1 (validated against stock)
//! rs-cart add 1
//!
//! # Set product 1 to exactly 3 units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart as JSON
//! - `add` - Add one unit of a product
//! - `remove` - Remove a product
//! - `update` - Set a product's quantity

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Catalog product id
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product_id: ProductId,
    },
    /// Set a product's quantity (values below 1 are ignored)
    Update {
        /// Catalog product id
        product_id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=info,rs_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = commands::cart::open()?;

    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => commands::cart::add(&store, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&store, product_id).await?,
        Commands::Update { product_id, amount } => {
            commands::cart::update(&store, product_id, amount).await?;
        }
    }

    commands::cart::show(&store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_amount() {
        let cli = Cli::try_parse_from(["rs-cart", "update", "3", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Update { product_id, amount: -1 } if product_id == ProductId::new(3)
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_product_id() {
        assert!(Cli::try_parse_from(["rs-cart", "add", "shoe"]).is_err());
    }
}

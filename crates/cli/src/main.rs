//! Rocket Cart CLI - drive the cart store from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! rc-cli show
//!
//! # Add one unit of product 1
//! rc-cli add 1
//!
//! # Set product 1 to three units
//! rc-cli set 1 3
//!
//! # Remove product 1
//! rc-cli remove 1
//! ```
//!
//! Configuration comes from the `CART_*` environment variables (see
//! `rocket_cart::config`). Start the oracle server first:
//! `cargo run -p rocket-cart-oracle-server`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocket_cart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(author, version, about = "Rocket Cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Set {
        /// Product ID
        product_id: ProductId,

        /// New amount (values <= 0 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for the cart crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocket_cart=info,rocket_cart_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::cart::open_store()?;

    match cli.command {
        Commands::Show => commands::cart::show(&store),
        Commands::Add { product_id } => commands::cart::add(&store, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&store, product_id).await?,
        Commands::Set { product_id, amount } => {
            commands::cart::set_amount(&store, product_id, amount).await?;
        }
    }
    Ok(())
}

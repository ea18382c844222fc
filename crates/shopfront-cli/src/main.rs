mod cart;
mod products;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopfront_cart::{CartStore, JsonFileCartRepository};
use shopfront_catalog::{Catalog, CatalogClient};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;
use crate::products::ProductsArgs;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Browse the storefront catalog and manage the local cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List one page of products matching the given filters
    Products(ProductsArgs),
    /// Show a single product with its colors and cart state
    Product {
        /// Product id
        id: String,
    },
    /// Show filter options with their product counts
    Filters {
        /// Narrow category and color options by name
        #[arg(long)]
        search: Option<String>,
    },
    /// Inspect or change the local cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, api_url = %config.api_url, "config loaded");

    let catalog: Arc<dyn Catalog> = Arc::new(CatalogClient::from_config(&config)?);
    let cart = Arc::new(CartStore::new(Arc::new(JsonFileCartRepository::new(
        config.cart_path.clone(),
    ))));

    match cli.command {
        Commands::Products(args) => {
            products::run_products(catalog, &config, &args).await;
            Ok(())
        }
        Commands::Product { id } => products::run_product(catalog, cart, &id).await,
        Commands::Filters { search } => {
            products::run_filters(catalog.as_ref(), search.as_deref()).await;
            Ok(())
        }
        Commands::Cart { command } => cart::run_cart(catalog, cart, command).await,
    }
}

#[cfg(test)]
mod tests;

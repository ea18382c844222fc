//! Cart command handlers for the CLI.
//!
//! Viewing the cart reconciles it against the catalog first, the same way
//! opening the cart page does. A line is kept only if its product can be
//! fetched, so a run without catalog access clears the saved cart.

use std::sync::Arc;

use clap::Subcommand;
use rust_decimal::Decimal;
use shopfront_app::ProductDetailController;
use shopfront_cart::{CartStore, ReconcileOutcome};
use shopfront_catalog::Catalog;
use shopfront_core::CartLine;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart contents after dropping products that are no longer available
    ///
    /// Every line whose product cannot be fetched is removed from the saved
    /// cart, including when the catalog is unreachable: running this offline
    /// empties the cart.
    Show,
    /// Add a product, or update its line if it is already in the cart
    Add {
        /// Product id
        id: String,
        /// Quantity, as typed into the quantity box
        #[arg(long)]
        quantity: String,
        /// Color id (defaults to the stored or default color)
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove the line at a position shown by `cart show` (starting at 1)
    Remove { position: usize },
    /// Drop lines whose product can no longer be fetched
    ///
    /// Any failed lookup counts, so an unreachable catalog drops every line.
    Reconcile,
}

/// Dispatch a `cart` sub-command.
///
/// # Errors
///
/// Returns an error if the cart file cannot be read or written, or, for
/// `add`, if the product cannot be loaded or the input is invalid.
pub(crate) async fn run_cart(
    catalog: Arc<dyn Catalog>,
    cart: Arc<CartStore>,
    command: CartCommands,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {
            let outcome = cart.reconcile(catalog.as_ref()).await?;
            print_removed_notice(&outcome);
            print_lines(&outcome.kept);
        }
        CartCommands::Add {
            id,
            quantity,
            color,
        } => {
            let mut detail = ProductDetailController::new(catalog, Arc::clone(&cart));
            detail.load(&id).await?;
            if let Some(color_id) = color.as_deref() {
                if !detail.select_color(color_id) {
                    anyhow::bail!("product '{id}' has no color '{color_id}'");
                }
            }
            detail.set_quantity_input(&quantity);
            let line = detail.add_to_cart()?;
            println!(
                "cart: {} x{} ({}) saved; {} line(s) in cart",
                line.title,
                line.quantity,
                display_color(&line),
                cart.count()?
            );
        }
        CartCommands::Remove { position } => {
            let removed = match position.checked_sub(1) {
                Some(index) => cart.remove(index)?,
                None => None,
            };
            match removed {
                Some(line) => println!("removed {} from cart", line.title),
                None => println!("no cart line at position {position}"),
            }
        }
        CartCommands::Reconcile => {
            let outcome = cart.reconcile(catalog.as_ref()).await?;
            if outcome.removed.is_empty() {
                println!("all {} cart line(s) are available", outcome.kept.len());
            } else {
                print_removed_notice(&outcome);
            }
        }
    }
    Ok(())
}

fn print_removed_notice(outcome: &ReconcileOutcome) {
    if outcome.removed.is_empty() {
        return;
    }
    println!(
        "{} item(s) were removed from your cart because they are no longer available",
        outcome.removed.len()
    );
    println!();
}

fn print_lines(lines: &[CartLine]) {
    if lines.is_empty() {
        println!("cart is empty");
        return;
    }

    println!(
        "{:<5}{:<36}{:<16}{:>5}{:>12}",
        "#", "TITLE", "COLOR", "QTY", "SUBTOTAL"
    );
    for (i, line) in lines.iter().enumerate() {
        println!(
            "{:<5}{:<36}{:<16}{:>5}{:>12}",
            i + 1,
            line.title,
            display_color(line),
            line.quantity,
            line.subtotal().round_dp(2)
        );
    }
    let total: Decimal = lines.iter().map(CartLine::subtotal).sum();
    println!();
    println!("Total: {}", total.round_dp(2));
}

fn display_color(line: &CartLine) -> &str {
    if line.color_name.is_empty() {
        "-"
    } else {
        &line.color_name
    }
}

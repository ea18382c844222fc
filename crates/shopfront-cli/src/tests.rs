use rust_decimal::Decimal;
use shopfront_core::{Availability, FilterFacets, PageSize};

use clap::CommandFactory;

use super::*;

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["shopfront"]).is_err());
}

#[test]
fn parses_products_with_defaults() {
    let cli = Cli::try_parse_from(["shopfront", "products"]).expect("expected valid cli args");
    let Commands::Products(args) = cli.command else {
        panic!("expected products command");
    };
    assert_eq!(args.availability, Availability::All);
    assert_eq!(args.page, 1);
    assert_eq!(args.page_size, None);
    assert!(args.selection().is_unconstrained());
}

#[test]
fn parses_products_filters_into_selection() {
    let cli = Cli::try_parse_from([
        "shopfront",
        "products",
        "--availability",
        "in-stock",
        "--min-price",
        "10.50",
        "--category",
        "c-7",
        "--color",
        "all",
        "--search",
        "oak desk",
        "--page",
        "3",
        "--page-size",
        "24",
    ])
    .expect("expected valid cli args");
    let Commands::Products(args) = cli.command else {
        panic!("expected products command");
    };

    assert_eq!(args.page, 3);
    assert_eq!(args.page_size, Some(PageSize::TwentyFour));

    let selection = args.selection();
    assert_eq!(selection.availability, Availability::InStock);
    assert_eq!(selection.price.min, Some(Decimal::new(1050, 2)));
    assert_eq!(selection.price.max, None);
    assert_eq!(selection.category.as_deref(), Some("c-7"));
    assert_eq!(selection.color, None);
    assert_eq!(selection.search, "oak desk");
}

#[test]
fn active_filters_line_lists_each_axis() {
    let cli = Cli::try_parse_from([
        "shopfront",
        "products",
        "--category",
        "c-7",
        "--max-price",
        "40",
        "--search",
        "oak",
    ])
    .expect("expected valid cli args");
    let Commands::Products(args) = cli.command else {
        panic!("expected products command");
    };

    let selection = args.selection();
    let applied = selection.applied_filters(&FilterFacets::fallback());
    let line = products::describe_applied(&applied);

    assert_eq!(
        line,
        "Active filters (3): category: c-7, price: up to 40, search: \"oak\""
    );
}

#[test]
fn rejects_unsupported_page_size() {
    let result = Cli::try_parse_from(["shopfront", "products", "--page-size", "50"]);
    assert!(result.is_err());
}

#[test]
fn rejects_unknown_availability() {
    let result = Cli::try_parse_from(["shopfront", "products", "--availability", "maybe"]);
    assert!(result.is_err());
}

#[test]
fn parses_product_command() {
    let cli = Cli::try_parse_from(["shopfront", "product", "p-42"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Product { ref id } if id == "p-42"));
}

#[test]
fn parses_filters_with_search() {
    let cli = Cli::try_parse_from(["shopfront", "filters", "--search", "red"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Filters { search: Some(ref s) } if s == "red"
    ));
}

#[test]
fn parses_cart_add() {
    let cli = Cli::try_parse_from([
        "shopfront", "cart", "add", "p-1", "--quantity", "2", "--color", "c-red",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Add { ref id, ref quantity, color: Some(ref c) }
        } if id == "p-1" && quantity == "2" && c == "c-red"
    ));
}

#[test]
fn cart_add_requires_quantity() {
    let result = Cli::try_parse_from(["shopfront", "cart", "add", "p-1"]);
    assert!(result.is_err());
}

#[test]
fn parses_cart_remove_position() {
    let cli =
        Cli::try_parse_from(["shopfront", "cart", "remove", "2"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Remove { position: 2 }
        }
    ));
}

#[test]
fn parses_cart_show_and_reconcile() {
    let show = Cli::try_parse_from(["shopfront", "cart", "show"]).expect("expected valid cli args");
    assert!(matches!(
        show.command,
        Commands::Cart {
            command: CartCommands::Show
        }
    ));
    let reconcile =
        Cli::try_parse_from(["shopfront", "cart", "reconcile"]).expect("expected valid cli args");
    assert!(matches!(
        reconcile.command,
        Commands::Cart {
            command: CartCommands::Reconcile
        }
    ));
}

#[test]
fn cart_show_help_warns_that_offline_runs_empty_the_cart() {
    let mut command = Cli::command();
    let cart = command.find_subcommand_mut("cart").expect("cart subcommand");
    for name in ["show", "reconcile"] {
        let sub = cart.find_subcommand_mut(name).expect("cart subcommand");
        let help = sub.get_long_about().expect("long help").to_string();
        assert!(help.contains("unreachable"), "{name}: {help}");
    }
}

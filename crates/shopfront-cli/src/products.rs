//! Catalog browsing commands: product grid, product detail, filter options.

use std::sync::Arc;

use clap::Args;
use rust_decimal::Decimal;
use shopfront_app::{load_facets, ProductDetailController, ProductListController};
use shopfront_cart::CartStore;
use shopfront_catalog::Catalog;
use shopfront_core::{
    AppConfig, AppliedFilter, Availability, FacetOption, FilterAxis, FilterFacets,
    FilterSelection, PageSize, PriceRange,
};

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Stock filter: all, in-stock, out-of-stock
    #[arg(long, default_value = "all")]
    pub availability: Availability,
    /// Lowest price to include
    #[arg(long)]
    pub min_price: Option<Decimal>,
    /// Highest price to include
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// Category id
    #[arg(long)]
    pub category: Option<String>,
    /// Color name
    #[arg(long)]
    pub color: Option<String>,
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,
    /// Products per page: 12, 24 or 36 (defaults to `SHOPFRONT_PAGE_SIZE`)
    #[arg(long)]
    pub page_size: Option<PageSize>,
}

impl ProductsArgs {
    pub(crate) fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::cleared();
        selection.availability = self.availability;
        selection.price = PriceRange {
            min: self.min_price,
            max: self.max_price,
        };
        selection.set_category(self.category.as_deref().unwrap_or_default());
        selection.set_color(self.color.as_deref().unwrap_or_default());
        selection.search = self.search.clone().unwrap_or_default();
        selection
    }
}

/// Print one page of the product grid.
///
/// Catalog failures print an empty grid and a warning rather than failing
/// the command.
pub(crate) async fn run_products(
    catalog: Arc<dyn Catalog>,
    config: &AppConfig,
    args: &ProductsArgs,
) {
    let mut list = ProductListController::new(
        Arc::clone(&catalog),
        args.page_size.unwrap_or(config.page_size),
        config.total_policy,
        config.forward_search,
    );
    let selection = args.selection();
    list.open(selection.clone(), args.page).await;

    if let Some(reason) = list.last_error() {
        eprintln!("warning: catalog unavailable ({reason})");
    }

    if selection.active_filter_count() > 0 {
        // Facets are only needed to name categories and colors.
        let facets = if selection.is_constrained(FilterAxis::Category)
            || selection.is_constrained(FilterAxis::Color)
        {
            load_facets(catalog.as_ref()).await
        } else {
            FilterFacets::fallback()
        };
        println!("{}", describe_applied(&selection.applied_filters(&facets)));
        println!();
    }

    if list.products().is_empty() {
        println!("no products found");
    } else {
        println!("{:<26}{:<40}{:>10}  STOCK", "ID", "TITLE", "PRICE");
        for product in list.products() {
            println!(
                "{:<26}{:<40}{:>10}  {}",
                product.id,
                truncate(&product.title, 38),
                product.price.round_dp(2),
                if product.stock { "in stock" } else { "out of stock" }
            );
        }
    }

    let (first, last) = list.visible_range();
    let page = list.page();
    println!();
    println!(
        "showing {first}-{last} of {} (page {}/{})",
        page.total_items(),
        page.current_page(),
        page.total_pages()
    );
}

/// Print a product's detail view.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog is
/// unreachable.
pub(crate) async fn run_product(
    catalog: Arc<dyn Catalog>,
    cart: Arc<CartStore>,
    id: &str,
) -> anyhow::Result<()> {
    let mut detail = ProductDetailController::new(catalog, cart);
    let product = detail.load(id).await?.clone();

    println!("{} ({})", product.title, product.sku);
    println!("Price: {}", product.price.round_dp(2));
    println!(
        "Stock: {}",
        if product.stock { "in stock" } else { "out of stock" }
    );
    if let Some(description) = product.description.as_deref() {
        println!();
        println!("{description}");
    }

    if !product.colors.is_empty() {
        println!();
        println!("Colors:");
        let selected = detail.selected_color().map(|c| c.id.clone());
        for color in &product.colors {
            let marker = if selected.as_deref() == Some(color.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "  {marker} {:<24}{:<10}{} image(s)",
                color.name,
                color.hex_code,
                color.images.len()
            );
        }
    }
    if let Some(image) = detail.default_image() {
        println!("Image: {}", image.url);
    }

    if !product.specifications.is_empty() {
        println!();
        println!("Specifications:");
        for spec in &product.specifications {
            println!("  {:<24}{}", spec.key, spec.value);
        }
    }

    if detail.in_cart() {
        println!();
        println!(
            "In cart: quantity {}",
            detail.quantity().map_or_else(|| "-".to_string(), |q| q.to_string())
        );
    }
    Ok(())
}

/// Print the filter panel options.
pub(crate) async fn run_filters(catalog: &dyn Catalog, search: Option<&str>) {
    let mut facets = load_facets(catalog).await;
    if let Some(term) = search {
        facets = facets.search(term);
    }

    print_facet_section("Categories", &facets.categories);
    print_facet_section("Colors", &facets.colors);
    print_facet_section("Availability", &facets.availability);
}

fn print_facet_section(title: &str, options: &[FacetOption]) {
    println!("{title}:");
    for option in options {
        let swatch = option.hex_code.as_deref().unwrap_or("");
        println!(
            "  {:<26}{:<28}{:<10}{:>6}",
            option.id, option.name, swatch, option.count
        );
    }
    println!();
}

/// One-line summary of the active filters, e.g.
/// `Active filters (2): category: Desks, search: "oak"`.
pub(crate) fn describe_applied(applied: &[AppliedFilter]) -> String {
    let chips: Vec<String> = applied
        .iter()
        .map(|filter| format!("{}: {}", filter.axis, filter.name))
        .collect();
    format!("Active filters ({}): {}", applied.len(), chips.join(", "))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

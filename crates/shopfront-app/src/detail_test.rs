use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shopfront_cart::InMemoryCartRepository;
use shopfront_catalog::{CatalogError, ProductPage};
use shopfront_core::{FilterCounts, NormalizedQuery};

use super::*;

fn image(url: &str, is_default: bool) -> ProductImage {
    ProductImage {
        url: url.to_string(),
        is_default,
    }
}

fn lamp() -> Product {
    Product {
        id: "lamp".to_string(),
        title: "Desk Lamp".to_string(),
        price: Decimal::new(3450, 2),
        sku: "LMP-1".to_string(),
        stock: true,
        description: Some("Adjustable arm".to_string()),
        colors: vec![
            Color {
                id: "black".to_string(),
                name: "Black".to_string(),
                hex_code: "#000000".to_string(),
                is_default: false,
                images: vec![image("black-side.png", false), image("black-front.png", true)],
            },
            Color {
                id: "white".to_string(),
                name: "White".to_string(),
                hex_code: "#ffffff".to_string(),
                is_default: true,
                images: vec![image("white-front.png", false)],
            },
        ],
        specifications: vec![],
    }
}

struct FixedCatalog {
    products: HashMap<String, Product>,
    offline: bool,
}

impl FixedCatalog {
    fn with(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            offline: false,
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(Self {
            products: HashMap::new(),
            offline: true,
        })
    }
}

#[async_trait]
impl Catalog for FixedCatalog {
    async fn list_products(&self, _query: &NormalizedQuery) -> Result<ProductPage, CatalogError> {
        Ok(ProductPage::default())
    }

    async fn filter_counts(&self) -> Result<FilterCounts, CatalogError> {
        Ok(FilterCounts::default())
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        if self.offline {
            return Err(CatalogError::UnexpectedStatus {
                status: 503,
                url: format!("/products/{id}"),
            });
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                url: format!("/products/{id}"),
            })
    }
}

fn setup(catalog: Arc<FixedCatalog>) -> (ProductDetailController, Arc<CartStore>) {
    let cart = Arc::new(CartStore::new(Arc::new(InMemoryCartRepository::new())));
    (
        ProductDetailController::new(catalog, Arc::clone(&cart)),
        cart,
    )
}

#[tokio::test]
async fn product_not_in_cart_opens_on_default_color_without_quantity() {
    let (mut detail, _cart) = setup(FixedCatalog::with(vec![lamp()]));

    detail.load("lamp").await.unwrap();

    assert_eq!(detail.selected_color().unwrap().id, "white");
    assert_eq!(detail.quantity(), None);
    assert!(!detail.in_cart());
    assert_eq!(detail.images().len(), 1);
}

#[tokio::test]
async fn product_in_cart_opens_on_stored_color_and_quantity() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    cart.add(&lamp(), "black", 3).unwrap();

    detail.load("lamp").await.unwrap();

    assert_eq!(detail.selected_color().unwrap().id, "black");
    assert_eq!(detail.quantity(), Some(3));
    assert!(detail.in_cart());
    assert_eq!(detail.default_image().unwrap().url, "black-front.png");
}

#[tokio::test]
async fn stored_color_no_longer_offered_falls_back_to_default() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    cart.add(&lamp(), "discontinued-red", 2).unwrap();

    detail.load("lamp").await.unwrap();

    assert_eq!(detail.selected_color().unwrap().id, "white");
    assert_eq!(detail.quantity(), Some(2));
}

#[tokio::test]
async fn selecting_color_switches_images_but_not_cart() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    cart.add(&lamp(), "white", 1).unwrap();
    detail.load("lamp").await.unwrap();

    assert!(detail.select_color("black"));
    assert!(!detail.select_color("chartreuse"));

    let urls: Vec<_> = detail.images().iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, ["black-side.png", "black-front.png"]);
    assert_eq!(cart.lines().unwrap()[0].color_id, "white");
}

#[tokio::test]
async fn add_to_cart_stores_selected_color_and_first_image() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    detail.load("lamp").await.unwrap();
    detail.select_color("black");
    detail.set_quantity_input("2");

    let line = detail.add_to_cart().unwrap();

    assert_eq!(line.color_id, "black");
    assert_eq!(line.color_name, "Black");
    assert_eq!(line.image_url, "black-side.png");
    assert_eq!(line.quantity, 2);
    assert!(detail.in_cart());
    assert_eq!(cart.lines().unwrap(), vec![line]);
}

#[tokio::test]
async fn add_to_cart_updates_existing_line() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    cart.add(&lamp(), "black", 1).unwrap();
    detail.load("lamp").await.unwrap();
    detail.set_quantity_input("4");

    detail.add_to_cart().unwrap();

    let lines = cart.lines().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 4);
    assert_eq!(lines[0].color_id, "black");
}

#[tokio::test]
async fn add_without_quantity_is_validation_error() {
    let (mut detail, cart) = setup(FixedCatalog::with(vec![lamp()]));
    detail.load("lamp").await.unwrap();
    detail.set_quantity_input("0");

    let err = detail.add_to_cart().unwrap_err();

    assert!(matches!(&err, DetailError::Validation(msg) if msg == "quantity required"));
    assert_eq!(cart.count().unwrap(), 0);
}

#[tokio::test]
async fn out_of_stock_product_cannot_be_added() {
    let mut sold_out = lamp();
    sold_out.stock = false;
    let (mut detail, cart) = setup(FixedCatalog::with(vec![sold_out]));
    detail.load("lamp").await.unwrap();
    detail.set_quantity_input("1");

    let err = detail.add_to_cart().unwrap_err();

    assert!(matches!(&err, DetailError::Validation(msg) if msg == "out of stock"));
    assert_eq!(cart.count().unwrap(), 0);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let (mut detail, _cart) = setup(FixedCatalog::with(vec![lamp()]));
    detail.load("lamp").await.unwrap();

    let err = detail.load("ghost").await.unwrap_err();

    assert!(matches!(&err, DetailError::NotFound { id } if id == "ghost"));
    assert!(detail.product().is_none(), "previous product is cleared");
}

#[tokio::test]
async fn unreachable_catalog_is_network_error() {
    let (mut detail, _cart) = setup(FixedCatalog::offline());
    let err = detail.load("lamp").await.unwrap_err();
    assert!(matches!(err, DetailError::Network(_)));
}

#[test]
fn add_before_load_is_validation_error() {
    let (mut detail, _cart) = setup(FixedCatalog::with(vec![]));
    assert!(matches!(
        detail.add_to_cart(),
        Err(DetailError::Validation(_))
    ));
}

#[test]
fn quantity_input_uses_leading_integer() {
    assert_eq!(parse_quantity("3"), Some(3));
    assert_eq!(parse_quantity("  12 pcs"), Some(12));
    assert_eq!(parse_quantity("+5"), Some(5));
    assert_eq!(parse_quantity("2.9"), Some(2));
    assert_eq!(parse_quantity(""), None);
    assert_eq!(parse_quantity("abc"), None);
    assert_eq!(parse_quantity("0"), None);
    assert_eq!(parse_quantity("-4"), None);
    assert_eq!(parse_quantity("99999999999"), None);
}

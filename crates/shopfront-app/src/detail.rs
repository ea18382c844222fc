//! Product detail view controller.
//!
//! Loading a product also looks it up in the cart: a product already in the
//! cart opens on the stored color and quantity, so "add to cart" acts as an
//! update of that line.

use std::sync::Arc;

use shopfront_cart::CartStore;
use shopfront_catalog::Catalog;
use shopfront_core::{CartLine, Color, Product, ProductImage};

use crate::error::DetailError;

pub struct ProductDetailController {
    catalog: Arc<dyn Catalog>,
    cart: Arc<CartStore>,
    product: Option<Product>,
    selected_color: Option<String>,
    quantity: Option<u32>,
    in_cart: bool,
}

impl ProductDetailController {
    pub fn new(catalog: Arc<dyn Catalog>, cart: Arc<CartStore>) -> Self {
        Self {
            catalog,
            cart,
            product: None,
            selected_color: None,
            quantity: None,
            in_cart: false,
        }
    }

    /// Fetches product `id` and initialises color and quantity.
    ///
    /// With a cart line for the product, the stored color is selected
    /// (falling back to the default color if the product no longer offers
    /// it) and the stored quantity is shown. Otherwise the default color is
    /// selected and the quantity is left unset.
    ///
    /// # Errors
    ///
    /// - [`DetailError::NotFound`] when the catalog has no such product.
    /// - [`DetailError::Network`] for any other fetch failure.
    ///
    /// On error the previously loaded product is cleared.
    pub async fn load(&mut self, id: &str) -> Result<&Product, DetailError> {
        self.product = None;
        self.selected_color = None;
        self.quantity = None;
        self.in_cart = false;

        let product = self
            .catalog
            .get_product(id)
            .await
            .map_err(|e| DetailError::from_catalog(id, e))?;

        let line = self.cart_line(&product.id);
        let stored_color = line
            .as_ref()
            .and_then(|l| product.color(&l.color_id))
            .or_else(|| product.default_color());

        self.selected_color = stored_color.map(|c| c.id.clone());
        self.quantity = line.as_ref().map(|l| l.quantity);
        self.in_cart = line.is_some();

        tracing::debug!(
            product_id = %product.id,
            in_cart = self.in_cart,
            color = ?self.selected_color,
            "product detail loaded"
        );
        Ok(self.product.insert(product))
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    #[must_use]
    pub fn selected_color(&self) -> Option<&Color> {
        let product = self.product.as_ref()?;
        product.color(self.selected_color.as_deref()?)
    }

    /// Images of the selected color, in display order.
    #[must_use]
    pub fn images(&self) -> &[ProductImage] {
        self.selected_color().map_or(&[], |c| c.images.as_slice())
    }

    /// Main image of the selected color.
    #[must_use]
    pub fn default_image(&self) -> Option<&ProductImage> {
        self.selected_color().and_then(Color::default_image)
    }

    #[must_use]
    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    /// `true` when the loaded product already had a cart line.
    #[must_use]
    pub fn in_cart(&self) -> bool {
        self.in_cart
    }

    /// Switches the displayed color. Does not touch the cart. Returns
    /// `false` if the loaded product has no such color.
    pub fn select_color(&mut self, color_id: &str) -> bool {
        let known = self
            .product
            .as_ref()
            .is_some_and(|p| p.color(color_id).is_some());
        if known {
            self.selected_color = Some(color_id.to_string());
        }
        known
    }

    /// Sets the quantity from raw text input. A leading integer is used
    /// (`"3 pcs"` is 3); anything that does not start with a positive
    /// integer leaves the quantity unset.
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity = parse_quantity(raw);
    }

    /// Writes the current selection to the cart, adding or replacing the
    /// product's line.
    ///
    /// # Errors
    ///
    /// - [`DetailError::Validation`] when nothing is loaded, the product is
    ///   out of stock, or the quantity is unset (`"quantity required"`).
    /// - [`DetailError::Cart`] when the cart cannot be saved.
    pub fn add_to_cart(&mut self) -> Result<CartLine, DetailError> {
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| DetailError::Validation("no product loaded".to_string()))?;
        if !product.stock {
            return Err(DetailError::Validation("out of stock".to_string()));
        }
        let quantity = self.quantity.unwrap_or(0);
        let color_id = self.selected_color.as_deref().unwrap_or_default();

        let line = self.cart.add(product, color_id, quantity)?;
        self.in_cart = true;
        tracing::info!(
            product_id = %line.product_id,
            quantity = line.quantity,
            "added to cart"
        );
        Ok(line)
    }

    fn cart_line(&self, product_id: &str) -> Option<CartLine> {
        match self.cart.lines() {
            Ok(lines) => lines.into_iter().find(|l| l.product_id == product_id),
            Err(e) => {
                tracing::warn!(error = %e, "cart unreadable; opening product without cart state");
                None
            }
        }
    }
}

/// Leading-integer parse of a quantity box. `None` for blank, non-numeric,
/// zero, negative, or overflowing input.
fn parse_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: u32 = rest[..end].parse().ok()?;
    (!negative && value > 0).then_some(value)
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;

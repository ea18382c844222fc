use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog service.
///
/// Field names follow the service's wire format (`_id`, `colorName`, ...).
/// Fields the storefront never reads (category objects, timestamps) are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Unit price. The service sends a JSON number; it is kept as a decimal
    /// so cart totals never pick up float drift.
    pub price: Decimal,
    #[serde(default)]
    pub sku: String,
    /// `true` when the product can currently be ordered.
    #[serde(default)]
    pub stock: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

impl Product {
    /// Returns the color flagged as default, falling back to the first color.
    #[must_use]
    pub fn default_color(&self) -> Option<&Color> {
        self.colors
            .iter()
            .find(|c| c.is_default)
            .or_else(|| self.colors.first())
    }

    /// Looks up a color variant by its id.
    #[must_use]
    pub fn color(&self, color_id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == color_id)
    }
}

/// A color variant of a [`Product`] with its own image gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "colorName", default)]
    pub name: String,
    #[serde(rename = "hexCode", default)]
    pub hex_code: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Color {
    /// Returns the image flagged as default, falling back to the first image.
    #[must_use]
    pub fn default_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|i| i.is_default)
            .or_else(|| self.images.first())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// A key/value row from the product's specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, is_default: bool) -> ProductImage {
        ProductImage {
            url: url.to_string(),
            is_default,
        }
    }

    fn color(id: &str, is_default: bool, images: Vec<ProductImage>) -> Color {
        Color {
            id: id.to_string(),
            name: format!("{id}-name"),
            hex_code: "#000000".to_string(),
            is_default,
            images,
        }
    }

    fn product(colors: Vec<Color>) -> Product {
        Product {
            id: "p1".to_string(),
            title: "Office Chair".to_string(),
            price: Decimal::new(14999, 2),
            sku: "CH-001".to_string(),
            stock: true,
            description: None,
            colors,
            specifications: vec![],
        }
    }

    #[test]
    fn default_color_prefers_flagged_variant() {
        let p = product(vec![color("red", false, vec![]), color("blue", true, vec![])]);
        assert_eq!(p.default_color().map(|c| c.id.as_str()), Some("blue"));
    }

    #[test]
    fn default_color_falls_back_to_first() {
        let p = product(vec![color("red", false, vec![]), color("blue", false, vec![])]);
        assert_eq!(p.default_color().map(|c| c.id.as_str()), Some("red"));
    }

    #[test]
    fn default_color_none_without_colors() {
        assert!(product(vec![]).default_color().is_none());
    }

    #[test]
    fn default_image_prefers_flagged_then_first() {
        let flagged = color("red", true, vec![image("a.png", false), image("b.png", true)]);
        assert_eq!(flagged.default_image().map(|i| i.url.as_str()), Some("b.png"));

        let unflagged = color("red", true, vec![image("a.png", false), image("b.png", false)]);
        assert_eq!(unflagged.default_image().map(|i| i.url.as_str()), Some("a.png"));
    }

    #[test]
    fn deserializes_service_wire_shape() {
        let raw = serde_json::json!({
            "_id": "65f0",
            "title": "Desk Lamp",
            "price": 24.5,
            "sku": "LMP-9",
            "stock": false,
            "category": { "_id": "c1", "name": "Lighting" },
            "colors": [{
                "_id": "c-black",
                "colorName": "Black",
                "hexCode": "#111111",
                "isDefault": true,
                "images": [{ "url": "https://cdn.example.com/lamp.png", "isDefault": true }]
            }],
            "specifications": [{ "key": "Wattage", "value": "40W" }]
        });

        let p: Product = serde_json::from_value(raw).expect("valid product json");
        assert_eq!(p.id, "65f0");
        assert_eq!(p.price, Decimal::new(245, 1));
        assert!(!p.stock);
        assert_eq!(p.colors[0].name, "Black");
        assert_eq!(p.specifications[0].value, "40W");
    }
}

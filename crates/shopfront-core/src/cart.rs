use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product's entry in the shopping cart.
///
/// A cart holds at most one line per `product_id`. Snapshots written by
/// older storefront builds used the keys `color` and `image`; both are
/// still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub sku: String,
    #[serde(alias = "color", default)]
    pub color_id: String,
    #[serde(default)]
    pub color_name: String,
    #[serde(default)]
    pub color_hex_code: String,
    #[serde(alias = "image", default)]
    pub image_url: String,
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let line = CartLine {
            product_id: "p1".to_string(),
            title: "Chair".to_string(),
            price: Decimal::new(1999, 2),
            sku: "CH-1".to_string(),
            color_id: "c-red".to_string(),
            color_name: "Red".to_string(),
            color_hex_code: "#ff0000".to_string(),
            image_url: "https://cdn.example.com/chair.png".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["colorId"], "c-red");
        assert_eq!(json["imageUrl"], "https://cdn.example.com/chair.png");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn reads_legacy_color_and_image_keys() {
        let line: CartLine = serde_json::from_value(serde_json::json!({
            "productId": "p9",
            "title": "Lamp",
            "price": 12.5,
            "sku": "LMP",
            "color": "c-black",
            "colorName": "Black",
            "colorHexCode": "#000",
            "image": "lamp.png",
            "quantity": 3
        }))
        .unwrap();
        assert_eq!(line.color_id, "c-black");
        assert_eq!(line.image_url, "lamp.png");
        assert_eq!(line.subtotal(), Decimal::new(375, 1));
    }
}

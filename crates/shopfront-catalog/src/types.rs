//! Response envelopes of the catalog service.
//!
//! ## Observed shapes
//!
//! ### `GET /products`
//! Two shapes are in circulation and both must be accepted:
//! - a bare JSON array of products, or
//! - an object `{ "data": [...], "pagination": { "total": N, ... } }`, where
//!   `pagination` (and `success`) may be missing.
//!
//! The wrapped shape shares the error form of the other endpoints: an object
//! with `success: false` or without `data` is a rejection, never an empty page.
//!
//! ### `GET /products/{id}` and `GET /products/counts`
//! Always wrapped: `{ "success": true, "data": {...} }`. A `success: false`
//! body (usually with a `message`) is returned with HTTP 200 for unknown
//! ids on some deployments, so it is surfaced as a rejection rather than a
//! parse failure.

use serde::Deserialize;
use shopfront_core::Product;

/// Body of `GET /products` in either of its observed shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductListBody {
    Bare(Vec<Product>),
    Wrapped {
        #[serde(default = "default_success")]
        success: bool,
        #[serde(default)]
        data: Option<Vec<Product>>,
        #[serde(default)]
        pagination: Option<Pagination>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ProductListBody {
    /// Splits the body into its items and the server-reported total, if any.
    ///
    /// # Errors
    ///
    /// Returns the service's message when a wrapped body reports
    /// `success: false` or carries no `data`.
    pub fn into_parts(self) -> Result<(Vec<Product>, Option<u64>), String> {
        match self {
            ProductListBody::Bare(items) => Ok((items, None)),
            ProductListBody::Wrapped {
                success: true,
                data: Some(data),
                pagination,
                ..
            } => Ok((data, pagination.and_then(|p| p.total))),
            ProductListBody::Wrapped { message, .. } => {
                Err(message.unwrap_or_else(|| "no data in response".to_string()))
            }
        }
    }
}

/// Pagination metadata. Only `total` is used; page/limit echoes are ignored.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: Option<u64>,
}

/// `{ success, data, message }` wrapper used by the detail and counts endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

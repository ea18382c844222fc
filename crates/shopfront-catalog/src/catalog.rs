//! The seam between storefront logic and the remote product service.
//!
//! Controllers and the cart store depend on [`Catalog`] rather than on the
//! HTTP client so they can be driven by an in-process fake in tests.

use async_trait::async_trait;
use shopfront_core::{FilterCounts, NormalizedQuery, Product};

use crate::error::CatalogError;

/// One page of products plus the service-reported total, when it sent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: Option<u64>,
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches one page of products matching `query`.
    async fn list_products(&self, query: &NormalizedQuery) -> Result<ProductPage, CatalogError>;

    /// Fetches per-facet product counts for the filter panel.
    async fn filter_counts(&self) -> Result<FilterCounts, CatalogError>;

    /// Fetches a single product. Unknown ids fail with an error for which
    /// [`CatalogError::is_not_found`] holds.
    async fn get_product(&self, id: &str) -> Result<Product, CatalogError>;
}

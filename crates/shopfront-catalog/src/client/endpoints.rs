//! Endpoint methods for `CatalogClient` and its [`Catalog`] implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shopfront_core::{FilterCounts, NormalizedQuery, Product};

use crate::catalog::{Catalog, ProductPage};
use crate::error::CatalogError;
use crate::types::{ApiEnvelope, ProductListBody};

use super::CatalogClient;

impl CatalogClient {
    /// Fetches one page of products.
    ///
    /// Accepts both the bare-array and the wrapped response shape; the total
    /// is `None` when the service did not report one.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] / [`CatalogError::UnexpectedStatus`] on
    ///   non-2xx responses.
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::Deserialize`] if the body matches neither shape.
    /// - [`CatalogError::Rejected`] when a wrapped body reports
    ///   `success: false` or has no `data`.
    pub async fn fetch_products_page(
        &self,
        query: &NormalizedQuery,
    ) -> Result<ProductPage, CatalogError> {
        let url = self.products_url(query);
        let body = self.fetch_body(&url).await?;
        let context = format!("product list page {}", query.page);
        let parsed = serde_json::from_str::<ProductListBody>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: context.clone(),
                source: e,
            }
        })?;

        let (items, total) = parsed
            .into_parts()
            .map_err(|message| CatalogError::Rejected { context, message })?;
        tracing::debug!(
            page = query.page,
            limit = query.limit,
            items = items.len(),
            total = ?total,
            "fetched product page"
        );
        Ok(ProductPage { items, total })
    }

    /// Fetches the facet counts behind the filter panel.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch_products_page`], plus [`CatalogError::Rejected`] when
    /// the envelope reports `success: false`.
    pub async fn fetch_filter_counts(&self) -> Result<FilterCounts, CatalogError> {
        let url = self.endpoint(&["products", "counts"]);
        let body = self.fetch_body(&url).await?;
        unwrap_envelope(&body, "filter counts")
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on HTTP 404.
    /// - [`CatalogError::Rejected`] when the envelope reports `success: false`.
    /// - [`CatalogError::Http`] / [`CatalogError::UnexpectedStatus`] /
    ///   [`CatalogError::Deserialize`] as for the other endpoints.
    pub async fn fetch_product(&self, id: &str) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", id]);
        let body = self.fetch_body(&url).await?;
        unwrap_envelope(&body, &format!("product {id}"))
    }
}

/// Parses a `{ success, data }` body and returns `data`.
fn unwrap_envelope<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, CatalogError> {
    let envelope = serde_json::from_str::<ApiEnvelope<T>>(body).map_err(|e| {
        CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        }
    })?;

    match envelope {
        ApiEnvelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiEnvelope { message, .. } => Err(CatalogError::Rejected {
            context: context.to_owned(),
            message: message.unwrap_or_else(|| "no data in response".to_string()),
        }),
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn list_products(&self, query: &NormalizedQuery) -> Result<ProductPage, CatalogError> {
        self.fetch_products_page(query).await
    }

    async fn filter_counts(&self) -> Result<FilterCounts, CatalogError> {
        self.fetch_filter_counts().await
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        self.fetch_product(id).await
    }
}

//! HTTP client for the storefront's product service.

mod endpoints;

use std::time::Duration;

use reqwest::{Client, Url};
use shopfront_core::{AppConfig, NormalizedQuery};

use crate::error::CatalogError;

/// Header carrying the storefront's API key.
pub(super) const SECRET_KEY_HEADER: &str = "X-Secret-Key";

/// HTTP client for the product service's REST API.
///
/// Handles not-found (404) and other non-2xx responses as typed errors.
/// Requests are issued exactly once: there is no retry layer, a failed call
/// is terminal for the user action that triggered it.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.example.com/api`).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse or
    ///   cannot carry a path.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so endpoint segments are
        // appended rather than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.map(str::to_owned),
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_url,
            config.api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Appends path segments to the base URL. Segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The constructor rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Builds the `GET /products` URL. Only keys present in `query` are sent.
    pub(crate) fn products_url(&self, query: &NormalizedQuery) -> Url {
        let mut url = self.endpoint(&["products"]);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        url
    }

    /// Issues a GET and returns the body text of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CatalogError::Http`] on network or TLS failure.
    async fn fetch_body(&self, url: &Url) -> Result<String, CatalogError> {
        tracing::debug!(path = url.path(), query = url.query().unwrap_or(""), "catalog request");

        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(SECRET_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;

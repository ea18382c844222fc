use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The service answered 2xx but flagged the request as unsuccessful
    /// (`"success": false`) or omitted the payload.
    #[error("catalog service rejected {context}: {message}")]
    Rejected { context: String, message: String },

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl CatalogError {
    /// `true` when the requested item does not exist (or is no longer
    /// offered), as opposed to the service being unreachable.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound { .. } | CatalogError::Rejected { .. }
        )
    }

    /// `true` for transport-level failures and non-404 error statuses.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_) | CatalogError::UnexpectedStatus { .. }
        )
    }
}

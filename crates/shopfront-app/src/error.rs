use shopfront_cart::CartError;
use shopfront_catalog::CatalogError;
use thiserror::Error;

/// Error state of the product detail view.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("product {id} is unavailable")]
    NotFound { id: String },

    #[error("catalog request failed: {0}")]
    Network(#[source] CatalogError),

    /// Rejected user input; nothing was changed.
    #[error("{0}")]
    Validation(String),

    #[error("cart could not be saved: {0}")]
    Cart(#[source] CartError),
}

impl DetailError {
    pub(crate) fn from_catalog(id: &str, err: CatalogError) -> Self {
        if err.is_not_found() {
            DetailError::NotFound { id: id.to_string() }
        } else {
            DetailError::Network(err)
        }
    }
}

impl From<CartError> for DetailError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Validation(msg) => DetailError::Validation(msg),
            other => DetailError::Cart(other),
        }
    }
}

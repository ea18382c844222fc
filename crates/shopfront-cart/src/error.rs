use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    /// Bad user input; the operation was not applied.
    #[error("{0}")]
    Validation(String),

    #[error("cart storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cart snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CartError {
    pub(crate) fn quantity_required() -> Self {
        CartError::Validation("quantity required".to_string())
    }
}

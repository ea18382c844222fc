pub mod app_config;
pub mod cart;
pub mod config;
pub mod facets;
pub mod filters;
pub mod pagination;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use cart::CartLine;
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{FacetOption, FilterCounts, FilterFacets};
pub use filters::{
    AppliedFilter, Availability, FilterAxis, FilterSelection, NormalizedQuery, PriceRange,
};
pub use pagination::{PageSize, PageState, TotalPolicy};
pub use products::{Color, Product, ProductImage, Specification};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub mod catalog;
pub mod client;
pub mod error;
pub mod types;

pub use catalog::{Catalog, ProductPage};
pub use client::CatalogClient;
pub use error::CatalogError;

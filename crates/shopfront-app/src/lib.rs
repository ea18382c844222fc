//! Storefront view controllers.
//!
//! Each controller owns the state one storefront screen needs and talks to
//! the catalog through the [`Catalog`](shopfront_catalog::Catalog) trait, so
//! the same code drives the CLI and the tests' in-process fakes.

pub mod detail;
pub mod error;
pub mod filter_panel;
pub mod listing;
pub mod timer;

pub use detail::ProductDetailController;
pub use error::DetailError;
pub use filter_panel::{load_facets, FilterPanel};
pub use listing::ProductListController;
pub use timer::{schedule, Debouncer, TimerHandle};

//! Browser-style shopping cart persisted as a single JSON snapshot.
//!
//! [`CartStore`] owns every mutation. Each one reads the whole snapshot from
//! a [`CartRepository`], changes it, writes the whole snapshot back, then
//! broadcasts a [`CartEvent`] so observers such as a cart badge can refresh
//! without re-reading storage.

pub mod error;
pub mod file;
pub mod repository;
pub mod store;

pub use error::CartError;
pub use file::JsonFileCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use store::{CartEvent, CartStore, ReconcileOutcome};

//! Storage abstraction for the cart snapshot.
//!
//! The [`CartRepository`] trait is the only way the store touches persisted
//! state, so the same [`CartStore`](crate::CartStore) runs against a JSON
//! file in the CLI and against [`InMemoryCartRepository`] in tests.
//!
//! Implementations must be `Send + Sync`; the store serialises
//! read-modify-write cycles itself, so repositories only need whole-snapshot
//! reads and writes to be individually atomic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use shopfront_core::CartLine;

use crate::error::CartError;

pub trait CartRepository: Send + Sync {
    /// Returns the full cart. A missing or unreadable snapshot is an empty
    /// cart, not an error.
    ///
    /// # Errors
    ///
    /// Only for storage failures other than "absent" or "corrupt".
    fn read(&self) -> Result<Vec<CartLine>, CartError>;

    /// Replaces the full cart with `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the snapshot cannot be encoded or stored.
    fn write(&self, lines: &[CartLine]) -> Result<(), CartError>;
}

/// In-memory repository for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    lines: RwLock<Vec<CartLine>>,
    writes: AtomicUsize,
}

impl InMemoryCartRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: RwLock::new(lines),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of snapshot writes performed so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CartRepository for InMemoryCartRepository {
    fn read(&self) -> Result<Vec<CartLine>, CartError> {
        let lines = self
            .lines
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(lines.clone())
    }

    fn write(&self, lines: &[CartLine]) -> Result<(), CartError> {
        let mut stored = self
            .lines
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *stored = lines.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

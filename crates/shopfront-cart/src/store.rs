use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use shopfront_catalog::Catalog;
use shopfront_core::{CartLine, Product};
use tokio::sync::broadcast;

use crate::error::CartError;
use crate::repository::CartRepository;

const EVENT_CAPACITY: usize = 64;

/// Notification sent after the persisted cart changes.
///
/// `count` is always the number of lines in the cart after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was added, updated, or removed through this store.
    Changed { count: usize },
    /// Reconciliation dropped `removed` lines in a single write.
    ItemsRemoved { removed: usize, count: usize },
    /// Another writer changed the snapshot and this store re-read it.
    ExternalChange { count: usize },
}

/// Result of [`CartStore::reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub kept: Vec<CartLine>,
    pub removed: Vec<CartLine>,
}

pub struct CartStore {
    repository: Arc<dyn CartRepository>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            repository,
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// Receives every [`CartEvent`] sent after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Current cart contents in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be read.
    pub fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        self.repository.read()
    }

    /// Number of distinct lines, as shown on the cart badge.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be read.
    pub fn count(&self) -> Result<usize, CartError> {
        Ok(self.repository.read()?.len())
    }

    /// Adds `product` in colour `color_id`, or replaces the existing line for
    /// the same product in place.
    ///
    /// Replacing overwrites colour, image, and quantity; it does not sum
    /// quantities. Colour name, hex code, and image come from the product's
    /// colour entry and are empty when `color_id` is not one of its colours.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] with `"quantity required"` when
    ///   `quantity` is zero. Nothing is written.
    /// - [`CartError::Storage`] / [`CartError::Encode`] on persistence failure.
    pub fn add(
        &self,
        product: &Product,
        color_id: &str,
        quantity: u32,
    ) -> Result<CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::quantity_required());
        }

        let color = product.color(color_id);
        let line = CartLine {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            sku: product.sku.clone(),
            color_id: color_id.to_string(),
            color_name: color.map(|c| c.name.clone()).unwrap_or_default(),
            color_hex_code: color.map(|c| c.hex_code.clone()).unwrap_or_default(),
            image_url: color
                .and_then(|c| c.images.first())
                .map(|img| img.url.clone())
                .unwrap_or_default(),
            quantity,
        };

        let count = {
            let _guard = self.lock();
            let mut lines = self.repository.read()?;
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => *existing = line.clone(),
                None => lines.push(line.clone()),
            }
            self.repository.write(&lines)?;
            lines.len()
        };

        tracing::debug!(
            product_id = %line.product_id,
            color_id = %line.color_id,
            quantity = line.quantity,
            lines = count,
            "cart line saved"
        );
        self.notify(CartEvent::Changed { count });
        Ok(line)
    }

    /// Removes the line at `index`.
    ///
    /// An out-of-range index is a no-op: nothing is written, no event is
    /// sent, and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] on persistence failure.
    pub fn remove(&self, index: usize) -> Result<Option<CartLine>, CartError> {
        let (removed, count) = {
            let _guard = self.lock();
            let mut lines = self.repository.read()?;
            if index >= lines.len() {
                return Ok(None);
            }
            let removed = lines.remove(index);
            self.repository.write(&lines)?;
            (removed, lines.len())
        };

        tracing::debug!(product_id = %removed.product_id, lines = count, "cart line removed");
        self.notify(CartEvent::Changed { count });
        Ok(Some(removed))
    }

    /// Re-reads the snapshot after another writer changed it and tells
    /// subscribers. Returns the new line count.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be read.
    pub fn on_external_change(&self) -> Result<usize, CartError> {
        let count = self.count()?;
        self.notify(CartEvent::ExternalChange { count });
        Ok(count)
    }

    /// Checks every line against the catalog and drops lines whose product
    /// can no longer be fetched, for any reason.
    ///
    /// All lookups run concurrently. Removal is applied to the snapshot as it
    /// stands once every lookup has settled, so lines added in the meantime
    /// survive. Drops are persisted in one write followed by one
    /// [`CartEvent::ItemsRemoved`]; nothing is written when every line checks
    /// out.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] on persistence failure. Catalog failures are
    /// not errors; they are the removal signal.
    pub async fn reconcile(&self, catalog: &dyn Catalog) -> Result<ReconcileOutcome, CartError> {
        let snapshot = self.repository.read()?;
        if snapshot.is_empty() {
            return Ok(ReconcileOutcome::default());
        }

        let checks = snapshot.iter().map(|line| async move {
            let result = catalog.get_product(&line.product_id).await;
            (line.product_id.as_str(), result)
        });

        let mut unavailable: HashSet<String> = HashSet::new();
        for (product_id, result) in join_all(checks).await {
            if let Err(e) = result {
                tracing::warn!(
                    product_id,
                    error = %e,
                    "cart product unavailable; dropping line"
                );
                unavailable.insert(product_id.to_string());
            }
        }

        if unavailable.is_empty() {
            return Ok(ReconcileOutcome {
                kept: snapshot,
                removed: Vec::new(),
            });
        }

        let (kept, removed) = {
            let _guard = self.lock();
            let current = self.repository.read()?;
            let (removed, kept): (Vec<_>, Vec<_>) = current
                .into_iter()
                .partition(|line| unavailable.contains(&line.product_id));
            if !removed.is_empty() {
                self.repository.write(&kept)?;
            }
            (kept, removed)
        };

        if !removed.is_empty() {
            tracing::info!(
                removed = removed.len(),
                remaining = kept.len(),
                "cart reconciled"
            );
            self.notify(CartEvent::ItemsRemoved {
                removed: removed.len(),
                count: kept.len(),
            });
        }
        Ok(ReconcileOutcome { kept, removed })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: CartEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

//! Filter panel input handling.
//!
//! [`FilterPanel`] turns individual input events into applied
//! [`FilterSelection`]s. Availability, category, color, and clear-all apply
//! immediately, as does removing a single applied filter. Search text and
//! the price range are debounced per input:
//! an edit only applies once that input has been quiet for the configured
//! window, and a newer edit replaces the pending one.
//!
//! Every applied selection is sent on the channel returned by
//! [`FilterPanel::new`]; the listing controller consumes it with
//! [`ProductListController::apply_filters`](crate::ProductListController::apply_filters).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use shopfront_catalog::Catalog;
use shopfront_core::{Availability, FilterAxis, FilterFacets, FilterSelection, PriceRange};
use tokio::sync::mpsc;

use crate::timer::Debouncer;

pub struct FilterPanel {
    applied: Arc<Mutex<FilterSelection>>,
    tx: mpsc::UnboundedSender<FilterSelection>,
    search_input: String,
    price_input: PriceRange,
    search_debounce: Debouncer,
    price_debounce: Debouncer,
}

impl FilterPanel {
    /// Creates a panel with every axis cleared, plus the receiver for
    /// applied selections.
    #[must_use]
    pub fn new(debounce: Duration) -> (Self, mpsc::UnboundedReceiver<FilterSelection>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let panel = Self {
            applied: Arc::new(Mutex::new(FilterSelection::cleared())),
            tx,
            search_input: String::new(),
            price_input: PriceRange::default(),
            search_debounce: Debouncer::new(debounce),
            price_debounce: Debouncer::new(debounce),
        };
        (panel, rx)
    }

    /// The most recently applied selection.
    #[must_use]
    pub fn applied(&self) -> FilterSelection {
        lock(&self.applied).clone()
    }

    /// Current search box text, which may not be applied yet.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Current price inputs, which may not be applied yet.
    #[must_use]
    pub fn price_input(&self) -> &PriceRange {
        &self.price_input
    }

    pub fn set_availability(&mut self, availability: Availability) {
        apply(&self.applied, &self.tx, |s| s.availability = availability);
    }

    pub fn set_category(&mut self, value: &str) {
        apply(&self.applied, &self.tx, |s| s.set_category(value));
    }

    pub fn set_color(&mut self, value: &str) {
        apply(&self.applied, &self.tx, |s| s.set_color(value));
    }

    /// Records a search keystroke. Applies after the debounce window.
    pub fn set_search(&mut self, text: &str) {
        text.clone_into(&mut self.search_input);
        let text = text.to_string();
        let applied = Arc::clone(&self.applied);
        let tx = self.tx.clone();
        self.search_debounce.call(move || {
            apply(&applied, &tx, |s| s.search = text);
        });
    }

    /// Records an edit to the minimum price box. Blank or non-numeric input
    /// clears the bound. Applies after the debounce window.
    pub fn set_min_price(&mut self, raw: &str) {
        self.price_input.min = PriceRange::parse_bound(raw);
        self.schedule_price();
    }

    /// Records an edit to the maximum price box. Blank or non-numeric input
    /// clears the bound. Applies after the debounce window.
    pub fn set_max_price(&mut self, raw: &str) {
        self.price_input.max = PriceRange::parse_bound(raw);
        self.schedule_price();
    }

    /// Clears one axis back to "all"/empty and applies at once. A pending
    /// debounced edit on that axis is dropped, and its input box emptied.
    pub fn remove_filter(&mut self, axis: FilterAxis) {
        match axis {
            FilterAxis::Search => {
                self.search_debounce.cancel();
                self.search_input.clear();
            }
            FilterAxis::Price => {
                self.price_debounce.cancel();
                self.price_input = PriceRange::default();
            }
            FilterAxis::Category | FilterAxis::Color | FilterAxis::Availability => {}
        }
        apply(&self.applied, &self.tx, |s| s.clear_axis(axis));
    }

    /// Resets every axis, drops pending edits, and applies at once.
    pub fn clear_all(&mut self) {
        self.search_debounce.cancel();
        self.price_debounce.cancel();
        self.search_input.clear();
        self.price_input = PriceRange::default();
        apply(&self.applied, &self.tx, |s| *s = FilterSelection::cleared());
    }

    fn schedule_price(&mut self) {
        let price = self.price_input.clone();
        let applied = Arc::clone(&self.applied);
        let tx = self.tx.clone();
        self.price_debounce.call(move || {
            apply(&applied, &tx, |s| s.price = price);
        });
    }
}

/// Changes one axis of the applied selection and emits the result.
///
/// Applies to the selection as it is when the change lands, so a debounced
/// edit never reverts an axis that changed while it was pending.
fn apply(
    applied: &Mutex<FilterSelection>,
    tx: &mpsc::UnboundedSender<FilterSelection>,
    change: impl FnOnce(&mut FilterSelection),
) {
    let snapshot = {
        let mut selection = lock(applied);
        change(&mut selection);
        selection.clone()
    };
    tracing::debug!(selection = ?snapshot, "filter selection applied");
    if tx.send(snapshot).is_err() {
        tracing::debug!("filter selection receiver dropped");
    }
}

fn lock(selection: &Mutex<FilterSelection>) -> std::sync::MutexGuard<'_, FilterSelection> {
    selection.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Loads the facet options for the filter panel. A failed counts request
/// falls back to "all"-only options with zero counts.
pub async fn load_facets(catalog: &dyn Catalog) -> FilterFacets {
    match catalog.filter_counts().await {
        Ok(counts) => FilterFacets::from_counts(&counts),
        Err(e) => {
            tracing::warn!(error = %e, "filter counts unavailable; using fallback facets");
            FilterFacets::fallback()
        }
    }
}

#[cfg(test)]
#[path = "filter_panel_test.rs"]
mod tests;

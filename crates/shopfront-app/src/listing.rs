//! Product grid controller.

use std::sync::Arc;

use shopfront_catalog::{Catalog, ProductPage};
use shopfront_core::{
    AppConfig, FilterSelection, NormalizedQuery, PageSize, PageState, Product, TotalPolicy,
};

/// Drives paged catalog fetches for the current filter selection.
///
/// Fetch failures never escape: the grid degrades to an empty page with a
/// single page of zero items, and [`Self::last_error`] carries the reason.
pub struct ProductListController {
    catalog: Arc<dyn Catalog>,
    selection: FilterSelection,
    page: PageState,
    products: Vec<Product>,
    total_policy: TotalPolicy,
    forward_search: bool,
    last_error: Option<String>,
}

impl ProductListController {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        page_size: PageSize,
        total_policy: TotalPolicy,
        forward_search: bool,
    ) -> Self {
        Self {
            catalog,
            selection: FilterSelection::cleared(),
            page: PageState::new(page_size),
            products: Vec::new(),
            total_policy,
            forward_search,
            last_error: None,
        }
    }

    pub fn from_config(catalog: Arc<dyn Catalog>, config: &AppConfig) -> Self {
        Self::new(
            catalog,
            config.page_size,
            config.total_policy,
            config.forward_search,
        )
    }

    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    #[must_use]
    pub fn page(&self) -> &PageState {
        &self.page
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Why the last fetch degraded to an empty page, if it did.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `(first, last)` positions of the loaded products, 1-based.
    #[must_use]
    pub fn visible_range(&self) -> (u64, u64) {
        self.page.visible_range(self.products.len())
    }

    /// Query for the current selection and page.
    #[must_use]
    pub fn query(&self) -> NormalizedQuery {
        let query = self
            .selection
            .to_query(self.page.current_page(), self.page.page_size());
        if self.forward_search {
            query
        } else {
            query.without_search()
        }
    }

    /// Applies a new filter selection and fetches its first page.
    ///
    /// The page resets to 1 whenever the selection differs from the current
    /// one; re-applying an identical selection just refreshes.
    pub async fn apply_filters(&mut self, selection: FilterSelection) {
        if selection != self.selection {
            self.selection = selection;
            self.page.reset_page();
        }
        self.refresh().await;
    }

    /// Loads `page` of `selection` directly, as when opening a shared link.
    pub async fn open(&mut self, selection: FilterSelection, page: u32) {
        self.selection = selection;
        self.page.go_to(page);
        self.refresh().await;
    }

    /// Goes to the next page and fetches it. Returns `false` without
    /// fetching when already on the last page.
    pub async fn next_page(&mut self) -> bool {
        if !self.page.next() {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Goes to the previous page and fetches it. Returns `false` without
    /// fetching when already on page 1.
    pub async fn prev_page(&mut self) -> bool {
        if !self.page.prev() {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Jumps to `page` and fetches it. Used for deep links, where the total
    /// is not known yet.
    pub async fn go_to_page(&mut self, page: u32) {
        self.page.go_to(page);
        self.refresh().await;
    }

    /// Changes the page size, returns to page 1, and fetches.
    pub async fn set_page_size(&mut self, page_size: PageSize) {
        self.page.set_page_size(page_size);
        self.refresh().await;
    }

    /// Fetches the current page and updates products and totals.
    ///
    /// When the new total shows the requested page lies past the end (a
    /// stale deep link, or a catalog that shrank), the last page is fetched
    /// instead, once.
    pub async fn refresh(&mut self) {
        let requested = self.page.current_page();
        if self.fetch_current().await && self.page.current_page() < requested {
            tracing::debug!(
                requested,
                last_page = self.page.current_page(),
                "requested page is past the end; loading last page"
            );
            self.fetch_current().await;
        }
    }

    /// One fetch of the current page. Returns `false` if it failed.
    async fn fetch_current(&mut self) -> bool {
        let query = self.query();
        match self.catalog.list_products(&query).await {
            Ok(ProductPage { items, total }) => {
                let total_items = self.total_policy.resolve_total(
                    total,
                    query.page,
                    query.limit,
                    items.len(),
                );
                self.page.set_total_items(total_items);
                self.products = items;
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(
                    page = query.page,
                    limit = query.limit,
                    error = %e,
                    "product list fetch failed; showing empty page"
                );
                self.products.clear();
                self.page.set_total_items(0);
                self.last_error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;

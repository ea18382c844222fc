//! Page-number pagination state for the product grid.
//!
//! The catalog service may or may not report a total item count. When it
//! does not, the total is inferred from how full the current page is, under
//! a configurable [`TotalPolicy`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Allowed grid page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Twelve,
    TwentyFour,
    ThirtySix,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Twelve, PageSize::TwentyFour, PageSize::ThirtySix];

    #[must_use]
    pub fn get(self) -> u32 {
        match self {
            PageSize::Twelve => 12,
            PageSize::TwentyFour => 24,
            PageSize::ThirtySix => 36,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(PageSize::Twelve),
            24 => Ok(PageSize::TwentyFour),
            36 => Ok(PageSize::ThirtySix),
            other => Err(format!("page size must be 12, 24 or 36 (got {other})")),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("page size \"{s}\" is not a number: {e}"))?;
        PageSize::try_from(n)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// How to estimate the total item count when the service omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalPolicy {
    /// A full page implies at least one more item exists, so "next" stays
    /// enabled until a short page is seen. May overshoot by one empty page.
    #[default]
    Optimistic,
    /// A full page is treated as the last known page; never reports a page
    /// beyond what has been seen.
    Conservative,
}

impl TotalPolicy {
    /// Infers the total from the page just fetched.
    #[must_use]
    pub fn infer_total(self, page: u32, limit: u32, items_on_page: usize) -> u64 {
        let page = u64::from(page.max(1));
        let limit = u64::from(limit);
        let items = items_on_page as u64;

        if items < limit {
            return (page - 1) * limit + items;
        }
        match self {
            TotalPolicy::Optimistic => page * limit + 1,
            TotalPolicy::Conservative => page * limit,
        }
    }

    /// Uses the reported total when the service gave a positive one,
    /// otherwise falls back to [`Self::infer_total`].
    #[must_use]
    pub fn resolve_total(
        self,
        reported: Option<u64>,
        page: u32,
        limit: u32,
        items_on_page: usize,
    ) -> u64 {
        match reported {
            Some(total) if total > 0 => total,
            _ => self.infer_total(page, limit, items_on_page),
        }
    }
}

impl FromStr for TotalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimistic" => Ok(TotalPolicy::Optimistic),
            "conservative" => Ok(TotalPolicy::Conservative),
            other => Err(format!(
                "unknown total policy \"{other}\" (expected optimistic or conservative)"
            )),
        }
    }
}

/// `max(1, ceil(total_items / page_size))`.
#[must_use]
pub fn total_pages(total_items: u64, page_size: PageSize) -> u32 {
    let pages = total_items.div_ceil(u64::from(page_size.get())).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Grid pagination state. `current_page` is 1-based and never exceeds
/// `total_pages` once a total has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    page_size: PageSize,
    total_items: u64,
    total_pages: u32,
}

impl PageState {
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_items: 0,
            total_pages: 1,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Records a new total, recomputes the page count, and pulls the current
    /// page back onto the last page if it now lies past the end.
    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.page_size);
        self.current_page = self.current_page.min(self.total_pages);
    }

    /// Jumps straight to `page` (clamped to at least 1). Used when the page
    /// comes from outside the grid, e.g. a CLI flag. The upper bound is only
    /// known after the next [`Self::set_total_items`].
    pub fn go_to(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Moves forward one page. Returns `false` (and changes nothing) on the
    /// last page.
    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one page. Returns `false` (and changes nothing) on page 1.
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
        self.total_pages = total_pages(self.total_items, page_size);
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// 1-based `(first, last)` item positions shown on the current page, for
    /// a "showing X-Y of N" caption. `(0, 0)` for an empty page.
    #[must_use]
    pub fn visible_range(&self, items_on_page: usize) -> (u64, u64) {
        if items_on_page == 0 {
            return (0, 0);
        }
        let first = u64::from(self.current_page - 1) * u64::from(self.page_size.get()) + 1;
        (first, first + items_on_page as u64 - 1)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

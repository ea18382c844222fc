//! User-facing filter selections and their translation into service queries.
//!
//! A [`FilterSelection`] is what the shopper picked in the filter panel. The
//! catalog service never sees it directly: [`FilterSelection::to_query`]
//! derives a [`NormalizedQuery`] in which an unconstrained axis is simply
//! absent, never sent as `"all"` or an empty string.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facets::FilterFacets;
use crate::pagination::PageSize;

/// Sentinel used by the filter panel for "no constraint on this axis".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl Availability {
    /// Value of the `stock` query key, or `None` when unconstrained.
    #[must_use]
    pub fn stock(self) -> Option<bool> {
        match self {
            Availability::All => None,
            Availability::InStock => Some(true),
            Availability::OutOfStock => Some(false),
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::All => write!(f, "all"),
            Availability::InStock => write!(f, "inStock"),
            Availability::OutOfStock => write!(f, "outOfStock"),
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Availability::All),
            "inStock" | "in-stock" => Ok(Availability::InStock),
            "outOfStock" | "out-of-stock" => Ok(Availability::OutOfStock),
            other => Err(format!(
                "unknown availability \"{other}\" (expected all, in-stock or out-of-stock)"
            )),
        }
    }
}

/// Inclusive price bounds. `None` means the bound was left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Parses one bound as typed into a price input.
    ///
    /// Blank input and text that is not a number both leave the bound empty.
    #[must_use]
    pub fn parse_bound(input: &str) -> Option<Decimal> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed).ok()
    }
}

/// One independently clearable axis of a [`FilterSelection`]. Both price
/// bounds form a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterAxis {
    Category,
    Color,
    Availability,
    Price,
    Search,
}

impl FilterAxis {
    /// Display order of applied-filter chips.
    pub const ALL: [FilterAxis; 5] = [
        FilterAxis::Category,
        FilterAxis::Color,
        FilterAxis::Availability,
        FilterAxis::Price,
        FilterAxis::Search,
    ];
}

impl std::fmt::Display for FilterAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterAxis::Category => write!(f, "category"),
            FilterAxis::Color => write!(f, "color"),
            FilterAxis::Availability => write!(f, "availability"),
            FilterAxis::Price => write!(f, "price"),
            FilterAxis::Search => write!(f, "search"),
        }
    }
}

/// A constraint currently in effect, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFilter {
    pub axis: FilterAxis,
    /// Display name. Categories resolve to their facet name when known.
    pub name: String,
    /// Swatch, for colors present in the facets.
    pub hex_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub availability: Availability,
    pub price: PriceRange,
    /// Category id; `None` is the "all" option.
    pub category: Option<String>,
    /// Color name; `None` is the "all" option.
    pub color: Option<String>,
    pub search: String,
}

impl FilterSelection {
    /// A selection with every axis unconstrained ("clear all filters").
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Sets the category axis from a panel value, mapping `"all"` and blank
    /// input to "unconstrained".
    pub fn set_category(&mut self, value: &str) {
        self.category = axis_value(value);
    }

    /// Sets the color axis from a panel value, mapping `"all"` and blank
    /// input to "unconstrained".
    pub fn set_color(&mut self, value: &str) {
        self.color = axis_value(value);
    }

    /// `true` when no axis carries a constraint.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.availability == Availability::All
            && self.price.min.is_none()
            && self.price.max.is_none()
            && self.category.is_none()
            && self.color.is_none()
            && self.search.is_empty()
    }

    /// `true` when `axis` narrows the results.
    #[must_use]
    pub fn is_constrained(&self, axis: FilterAxis) -> bool {
        match axis {
            FilterAxis::Category => self.category.is_some(),
            FilterAxis::Color => self.color.is_some(),
            FilterAxis::Availability => self.availability != Availability::All,
            FilterAxis::Price => self.price.min.is_some() || self.price.max.is_some(),
            FilterAxis::Search => !self.search.is_empty(),
        }
    }

    /// Resets one axis to its unconstrained value (`"all"` or empty).
    pub fn clear_axis(&mut self, axis: FilterAxis) {
        match axis {
            FilterAxis::Category => self.category = None,
            FilterAxis::Color => self.color = None,
            FilterAxis::Availability => self.availability = Availability::All,
            FilterAxis::Price => self.price = PriceRange::default(),
            FilterAxis::Search => self.search.clear(),
        }
    }

    /// Number of constrained axes; always the length of
    /// [`Self::applied_filters`].
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        FilterAxis::ALL
            .iter()
            .filter(|axis| self.is_constrained(**axis))
            .count()
    }

    /// Labels every constrained axis for display, in [`FilterAxis::ALL`]
    /// order.
    ///
    /// Category and color names are looked up in `facets`; a value the
    /// facets do not list (e.g. counts failed to load) is shown as-is.
    #[must_use]
    pub fn applied_filters(&self, facets: &FilterFacets) -> Vec<AppliedFilter> {
        let mut applied = Vec::new();

        if let Some(category) = &self.category {
            let name = facets
                .categories
                .iter()
                .find(|o| !o.is_all() && o.id == *category)
                .map_or_else(|| category.clone(), |o| o.name.clone());
            applied.push(AppliedFilter {
                axis: FilterAxis::Category,
                name,
                hex_code: None,
            });
        }

        if let Some(color) = &self.color {
            let option = facets
                .colors
                .iter()
                .find(|o| !o.is_all() && o.id == *color);
            applied.push(AppliedFilter {
                axis: FilterAxis::Color,
                name: option.map_or_else(|| color.clone(), |o| o.name.clone()),
                hex_code: option.and_then(|o| o.hex_code.clone()),
            });
        }

        let availability = match self.availability {
            Availability::All => None,
            Availability::InStock => Some("In Stock"),
            Availability::OutOfStock => Some("Out of Stock"),
        };
        if let Some(name) = availability {
            applied.push(AppliedFilter {
                axis: FilterAxis::Availability,
                name: name.to_string(),
                hex_code: None,
            });
        }

        let price = match (self.price.min, self.price.max) {
            (Some(min), Some(max)) => Some(format!("{} - {}", min.normalize(), max.normalize())),
            (Some(min), None) => Some(format!("from {}", min.normalize())),
            (None, Some(max)) => Some(format!("up to {}", max.normalize())),
            (None, None) => None,
        };
        if let Some(name) = price {
            applied.push(AppliedFilter {
                axis: FilterAxis::Price,
                name,
                hex_code: None,
            });
        }

        if !self.search.is_empty() {
            applied.push(AppliedFilter {
                axis: FilterAxis::Search,
                name: format!("\"{}\"", self.search),
                hex_code: None,
            });
        }

        applied
    }

    /// Derives the server-ready query for one page of results.
    ///
    /// Pure and deterministic: the same selection and pagination always give
    /// the same query.
    #[must_use]
    pub fn to_query(&self, page: u32, page_size: PageSize) -> NormalizedQuery {
        NormalizedQuery {
            page: page.max(1),
            limit: page_size.get(),
            min_price: self.price.min,
            max_price: self.price.max,
            stock: self.availability.stock(),
            color: self.color.clone(),
            category_id: self.category.clone(),
            search: (!self.search.is_empty()).then(|| self.search.clone()),
        }
    }
}

fn axis_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ALL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parameter set sent to `GET /products`.
///
/// `None` fields are omitted from the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub page: u32,
    pub limit: u32,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub stock: Option<bool>,
    pub color: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl NormalizedQuery {
    /// Drops the free-text search key, for services that do not support it.
    #[must_use]
    pub fn without_search(mut self) -> Self {
        self.search = None;
        self
    }

    /// Query pairs in wire order. Pagination keys always come first.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.normalize().to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.normalize().to_string()));
        }
        if let Some(stock) = self.stock {
            pairs.push(("stock", stock.to_string()));
        }
        if let Some(color) = &self.color {
            pairs.push(("color", color.clone()));
        }
        if let Some(category_id) = &self.category_id {
            pairs.push(("categoryId", category_id.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

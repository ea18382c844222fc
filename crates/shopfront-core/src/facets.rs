//! Filter panel options built from the service's `/products/counts` payload.

use serde::{Deserialize, Serialize};

use crate::filters::ALL;

/// Raw facet counts as reported by the catalog service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCounts {
    #[serde(default)]
    pub categories: Vec<CategoryCount>,
    #[serde(default)]
    pub colors: Vec<ColorCount>,
    #[serde(default)]
    pub stock_status: Vec<StockCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: String,
    pub category_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCount {
    pub color_name: String,
    #[serde(default)]
    pub hex_code: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCount {
    pub in_stock: bool,
    pub count: u64,
}

/// One selectable option in a filter panel section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    /// Value written into the selection (`"all"` for the catch-all option).
    pub id: String,
    pub name: String,
    /// Swatch color, colors section only.
    pub hex_code: Option<String>,
    pub count: u64,
}

impl FacetOption {
    fn all(count: u64) -> Self {
        Self {
            id: ALL.to_string(),
            name: "All".to_string(),
            hex_code: None,
            count,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.id == ALL
    }
}

/// Options for every section of the filter panel. Each section starts with
/// an "All" option whose count is the sum of the section's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterFacets {
    pub categories: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub availability: Vec<FacetOption>,
}

impl FilterFacets {
    #[must_use]
    pub fn from_counts(counts: &FilterCounts) -> Self {
        let mut categories = vec![FacetOption::all(
            counts.categories.iter().map(|c| c.count).sum(),
        )];
        categories.extend(counts.categories.iter().map(|c| FacetOption {
            id: c.category_id.clone(),
            name: c.category_name.clone(),
            hex_code: None,
            count: c.count,
        }));

        // Colors are filtered by name, so the name doubles as the id.
        let mut colors = vec![FacetOption::all(counts.colors.iter().map(|c| c.count).sum())];
        colors.extend(counts.colors.iter().map(|c| FacetOption {
            id: c.color_name.clone(),
            name: c.color_name.clone(),
            hex_code: Some(c.hex_code.clone()),
            count: c.count,
        }));

        let in_stock = counts
            .stock_status
            .iter()
            .find(|s| s.in_stock)
            .map_or(0, |s| s.count);
        let availability = vec![
            FacetOption::all(counts.stock_status.iter().map(|s| s.count).sum()),
            FacetOption {
                id: "inStock".to_string(),
                name: "In Stock".to_string(),
                hex_code: None,
                count: in_stock,
            },
        ];

        Self {
            categories,
            colors,
            availability,
        }
    }

    /// Panel contents when the counts request failed: only the "All" option,
    /// with a zero count, in each section.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            categories: vec![FacetOption::all(0)],
            colors: vec![FacetOption::all(0)],
            availability: vec![FacetOption::all(0)],
        }
    }

    /// Narrows categories and colors to options whose name contains `term`
    /// (case-insensitive). The "All" option is always kept. A blank term
    /// returns the facets unchanged.
    #[must_use]
    pub fn search(&self, term: &str) -> Self {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.clone();
        }
        let keep = |o: &&FacetOption| o.is_all() || o.name.to_lowercase().contains(&term);
        Self {
            categories: self.categories.iter().filter(keep).cloned().collect(),
            colors: self.colors.iter().filter(keep).cloned().collect(),
            availability: self.availability.clone(),
        }
    }
}

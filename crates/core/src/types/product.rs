//! Product catalog model.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Slug of the sentinel category that bypasses category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A product offered in the catalog.
///
/// Products are supplied by the catalog and never mutated by the cart or
/// wishlist; the stores keep their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Category slug (e.g. `electronics`).
    pub category: String,
    /// Average review score, 0.0 to 5.0.
    pub rating: f32,
    /// Units in stock.
    pub stock: u32,
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Slug used for filtering (`all` is the sentinel).
    pub id: String,
    /// Display label.
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The category filter this entry selects.
    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::from_slug(&self.id)
    }
}

/// Category selection for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every product, regardless of category.
    #[default]
    All,
    /// Only products whose category slug matches exactly.
    Named(String),
}

impl CategoryFilter {
    /// Interpret a category slug; `all` (any case) and blank select everything.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim();
        if slug.is_empty() || slug.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Named(slug.to_owned())
        }
    }

    /// Whether a product belongs to this selection.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(slug) => product.category == *slug,
        }
    }

    /// The slug form of this filter.
    #[must_use]
    pub fn as_slug(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(slug) => slug,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_slug(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

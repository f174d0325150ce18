//! Product listing filters: text search, price range and rating.
//!
//! Applied in memory to whatever the catalog returned for the current
//! category. Category selection itself happens in the catalog lookup.

use shopfront_core::{Price, Product};

/// Filters for a product listing. The default matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    /// Inclusive `(min, max)` unit price.
    pub price_range: Option<(Price, Price)>,
    /// Rating thresholds; a product passes if it meets any one of them.
    pub min_ratings: Vec<f32>,
}

impl ProductQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub const fn price_range(mut self, min: Price, max: Price) -> Self {
        self.price_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn min_ratings(mut self, ratings: impl IntoIterator<Item = f32>) -> Self {
        self.min_ratings = ratings.into_iter().collect();
        self
    }

    /// Add a rating threshold if absent, remove it if present.
    pub fn toggle_rating(&mut self, rating: f32) {
        if let Some(i) = self
            .min_ratings
            .iter()
            .position(|r| (r - rating).abs() < f32::EPSILON)
        {
            self.min_ratings.remove(i);
        } else {
            self.min_ratings.push(rating);
        }
    }

    /// Clear price and rating filters, keeping the search text.
    pub fn reset_filters(&mut self) {
        self.price_range = None;
        self.min_ratings.clear();
    }

    /// Whether one product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_price(product) && self.matches_rating(product)
    }

    /// Products that pass, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(text) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if text.is_empty() {
            return true;
        }
        let needle = text.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.price_range
            .is_none_or(|(min, max)| product.price >= min && product.price <= max)
    }

    fn matches_rating(&self, product: &Product) -> bool {
        self.min_ratings.is_empty() || self.min_ratings.iter().any(|r| product.rating >= *r)
    }
}

/// Whole-dollar `(floor(min), ceil(max))` of the listed prices, used as the
/// initial price slider range. `None` for an empty listing.
#[must_use]
pub fn price_bounds(products: &[Product]) -> Option<(Price, Price)> {
    let min = products.iter().map(|p| p.price).min()?;
    let max = products.iter().map(|p| p.price).max()?;
    Some((min.floor(), max.ceil()))
}

/// The first `count` products, for the home page hero row.
#[must_use]
pub fn featured(products: &[Product], count: usize) -> &[Product] {
    products.get(..count).unwrap_or(products)
}

/// A purchasable quantity for the product page stepper: at least 1 and at
/// most the units in stock.
#[must_use]
pub fn clamp_quantity(product: &Product, requested: i64) -> u32 {
    let max = product.stock.max(1);
    u32::try_from(requested.max(1)).map_or(max, |q| q.min(max))
}

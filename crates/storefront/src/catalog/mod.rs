//! Product catalog lookups.
//!
//! # Architecture
//!
//! - [`Catalog`] is the asynchronous lookup contract pages depend on. Every
//!   lookup distinguishes found, not found (`Ok(None)` / empty list) and
//!   backend failure (`Err`), so a real backend can replace the demo data.
//! - [`StaticCatalog`] serves the fixed demo dataset and never fails.
//! - [`CachedCatalog`] wraps any catalog with an in-memory `moka` cache.
//!
//! The cart and wishlist stores never call the catalog; pages look products
//! up here and hand them to the stores.
//!
//! # Example
//!
//! ```rust
//! use shopfront::catalog::{Catalog, StaticCatalog};
//! use shopfront_core::{CategoryFilter, ProductId};
//!
//! # tokio_test_block(async {
//! let catalog = StaticCatalog::new();
//! let kitchen = catalog
//!     .products_in_category(&CategoryFilter::from_slug("kitchen"))
//!     .await
//!     .unwrap();
//! assert_eq!(kitchen.len(), 2);
//! assert!(catalog.product(ProductId::new(999)).await.unwrap().is_none());
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod cache;
mod seed;

use std::future::Future;

use shopfront_core::{Category, CategoryFilter, Product, ProductId};
use thiserror::Error;
use tracing::instrument;

pub use cache::CachedCatalog;

/// Errors a catalog backend can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Backend could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with something unusable.
    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Read-only product lookups.
pub trait Catalog: Send + Sync {
    /// Every product, in catalog order.
    fn all_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// One product by id; `Ok(None)` when no product has that id.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Products in a category; [`CategoryFilter::All`] returns the full catalog.
    fn products_in_category(
        &self,
        filter: &CategoryFilter,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Category labels, sentinel `all` first.
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, CatalogError>> + Send;
}

/// The fixed demo catalog: eight products in four product categories plus
/// the `all` sentinel.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl StaticCatalog {
    /// Catalog with the built-in demo dataset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: seed::products(),
            categories: seed::categories(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for StaticCatalog {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip_all, fields(category = %filter))]
    async fn products_in_category(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::Price;

    use super::*;

    #[tokio::test]
    async fn test_all_products() {
        let products = StaticCatalog::new().all_products().await.unwrap();
        assert_eq!(products.len(), 8);
        let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_product_found_and_not_found() {
        let catalog = StaticCatalog::new();

        let headphones = catalog.product(ProductId::new(2)).await.unwrap().unwrap();
        assert_eq!(headphones.name, "Wireless Bluetooth Headphones");
        assert_eq!(headphones.price, Price::from_cents(14999));
        assert_eq!(
            headphones.description,
            "Premium noise-cancelling headphones with 30-hour battery life. These wireless \
             headphones deliver exceptional sound quality while blocking out ambient noise. The \
             comfortable over-ear design and long battery life make them perfect for travel or \
             daily use."
        );

        assert!(catalog.product(ProductId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_products_in_category() {
        let catalog = StaticCatalog::new();

        let all = catalog
            .products_in_category(&CategoryFilter::All)
            .await
            .unwrap();
        assert_eq!(all.len(), 8);

        let electronics = catalog
            .products_in_category(&CategoryFilter::from_slug("electronics"))
            .await
            .unwrap();
        let ids: Vec<i32> = electronics.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 6]);

        let unknown = catalog
            .products_in_category(&CategoryFilter::from_slug("garden"))
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_categories_start_with_sentinel() {
        let categories = StaticCatalog::new().categories().await.unwrap();
        let slugs: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["all", "electronics", "clothing", "accessories", "kitchen"]
        );
        assert_eq!(categories.first().unwrap().filter(), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_every_product_category_is_listed() {
        let catalog = StaticCatalog::new();
        let categories = catalog.categories().await.unwrap();
        for product in catalog.all_products().await.unwrap() {
            assert!(
                categories.iter().any(|c| c.id == product.category),
                "{} has unlisted category {}",
                product.name,
                product.category
            );
        }
    }
}

//! Response cache in front of a catalog backend.

use std::time::Duration;

use moka::future::Cache;
use shopfront_core::{Category, CategoryFilter, Product, ProductId};
use tracing::{debug, instrument};

use super::{Catalog, CatalogError};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Product(ProductId),
    Category(CategoryFilter),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

/// A [`Catalog`] that memoizes successful lookups of another catalog.
///
/// Found products, category listings and the category list are cached for
/// the configured TTL. Not-found results and errors are never cached, so a
/// transient backend failure is retried on the next call.
pub struct CachedCatalog<C> {
    inner: C,
    cache: Cache<CacheKey, CacheValue>,
}

impl<C: Catalog> CachedCatalog<C> {
    /// Wrap `inner` with entries expiring after `ttl`.
    #[must_use]
    pub fn new(inner: C, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }

    /// The wrapped catalog.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Drop a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.cache.invalidate(&CacheKey::Product(id)).await;
    }

    /// Drop every cached entry.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.products_in_category(&CategoryFilter::All).await
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let found = self.inner.product(id).await?;
        if let Some(product) = &found {
            self.cache
                .insert(key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }
        Ok(found)
    }

    #[instrument(skip_all, fields(category = %filter))]
    async fn products_in_category(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Category(filter.clone());
        if let Some(CacheValue::Products(products)) = self.cache.get(&key).await {
            debug!("Cache hit for category listing");
            return Ok(products);
        }

        let products = match filter {
            CategoryFilter::All => self.inner.all_products().await?,
            CategoryFilter::Named(_) => self.inner.products_in_category(filter).await?,
        };
        self.cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories);
        }

        let categories = self.inner.categories().await?;
        self.cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::catalog::StaticCatalog;

    /// Counts backend calls and can be switched into failure mode.
    #[derive(Default)]
    struct CountingCatalog {
        inner: StaticCatalog,
        calls: AtomicUsize,
        failing: std::sync::atomic::AtomicBool,
    }

    impl CountingCatalog {
        fn hit(&self) -> Result<(), CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(CatalogError::Unavailable("backend down".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Catalog for CountingCatalog {
        async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.hit()?;
            self.inner.all_products().await
        }

        async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
            self.hit()?;
            self.inner.product(id).await
        }

        async fn products_in_category(
            &self,
            filter: &CategoryFilter,
        ) -> Result<Vec<Product>, CatalogError> {
            self.hit()?;
            self.inner.products_in_category(filter).await
        }

        async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
            self.hit()?;
            self.inner.categories().await
        }
    }

    fn cached() -> CachedCatalog<CountingCatalog> {
        CachedCatalog::new(CountingCatalog::default(), Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_product_hits_backend_once() {
        let catalog = cached();
        let first = catalog.product(ProductId::new(3)).await.unwrap();
        let second = catalog.product(ProductId::new(3)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(catalog.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let catalog = cached();
        assert!(catalog.product(ProductId::new(42)).await.unwrap().is_none());
        assert!(catalog.product(ProductId::new(42)).await.unwrap().is_none());
        assert_eq!(catalog.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_pass_through_uncached() {
        let catalog = cached();
        catalog.inner().failing.store(true, Ordering::SeqCst);
        assert_eq!(
            catalog.categories().await,
            Err(CatalogError::Unavailable("backend down".to_string()))
        );

        catalog.inner().failing.store(false, Ordering::SeqCst);
        assert_eq!(catalog.categories().await.unwrap().len(), 5);
        assert_eq!(catalog.categories().await.unwrap().len(), 5);
        assert_eq!(catalog.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_category_listings_are_cached_per_filter() {
        let catalog = cached();
        let kitchen = CategoryFilter::from_slug("kitchen");
        assert_eq!(catalog.products_in_category(&kitchen).await.unwrap().len(), 2);
        assert_eq!(catalog.products_in_category(&kitchen).await.unwrap().len(), 2);
        assert_eq!(catalog.all_products().await.unwrap().len(), 8);
        assert_eq!(catalog.all_products().await.unwrap().len(), 8);
        assert_eq!(catalog.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_product() {
        let catalog = cached();
        catalog.product(ProductId::new(1)).await.unwrap();
        catalog.invalidate_product(ProductId::new(1)).await;
        catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(catalog.inner().calls(), 2);

        catalog.invalidate_all().await;
        catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(catalog.inner().calls(), 3);
    }
}

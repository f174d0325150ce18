//! Application state: the context object built once at startup.
//!
//! Owns the configuration, the catalog and the session's cart and wishlist
//! stores. Pages borrow it instead of reaching for globals.

use std::sync::Arc;

use shopfront_core::{Category, CategoryFilter, Product, ProductId};
use tracing::{info, instrument};

use crate::cart::{CartStore, CartTotals};
use crate::catalog::Catalog;
use crate::checkout::{Checkout, CheckoutForm, OrderConfirmation, OrderSummary};
use crate::config::ShopConfig;
use crate::error::{AppError, Result};
use crate::notify::SharedNotifier;
use crate::search::ProductQuery;
use crate::storage::{CART_SLOT, KeyValueStore, Slot, WISHLIST_SLOT};
use crate::wishlist::WishlistStore;

/// Everything a page needs for one shopping session.
pub struct AppState<C> {
    config: ShopConfig,
    catalog: Arc<C>,
    cart: CartStore,
    wishlist: WishlistStore,
    checkout: Checkout,
}

impl<C: Catalog> AppState<C> {
    /// Create the application state, rehydrating both stores from `store`.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopfront configuration
    /// * `store` - Durable key/value backend for the cart and wishlist slots
    /// * `catalog` - Product lookups
    /// * `notifier` - Optional observer told about cart, wishlist and order events
    #[must_use]
    pub fn new(
        config: ShopConfig,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<C>,
        notifier: Option<SharedNotifier>,
    ) -> Self {
        let mut cart = CartStore::open(Slot::new(Arc::clone(&store), CART_SLOT));
        let mut wishlist = WishlistStore::open(Slot::new(store, WISHLIST_SLOT));
        let mut checkout = Checkout::new(config.pricing, config.checkout_delay);

        if let Some(notifier) = notifier {
            cart = cart.with_notifier(Arc::clone(&notifier));
            wishlist = wishlist.with_notifier(Arc::clone(&notifier));
            checkout = checkout.with_notifier(notifier);
        }

        Self {
            config,
            catalog,
            cart,
            wishlist,
            checkout,
        }
    }

    /// Get the shopfront configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Get the catalog.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Header badge: item count and subtotal.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Totals for the cart and checkout pages.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        self.checkout.summary(self.cart.cart())
    }

    /// Category tabs for the listing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.catalog.categories().await?)
    }

    /// Products in `filter` that pass `query`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails.
    #[instrument(skip_all, fields(category = %filter))]
    pub async fn browse(
        &self,
        filter: &CategoryFilter,
        query: &ProductQuery,
    ) -> Result<Vec<Product>> {
        let products = self.catalog.products_in_category(filter).await?;
        Ok(products.into_iter().filter(|p| query.matches(p)).collect())
    }

    /// Look up a product for its detail page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown ids, or the catalog error.
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.catalog
            .product(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown ids, or the catalog error.
    pub async fn add_to_cart(&mut self, id: ProductId, quantity: i64) -> Result<()> {
        let product = self.product(id).await?;
        self.cart.add(&product, quantity);
        Ok(())
    }

    /// Toggle a catalog product's wishlist membership; `true` if now present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for unknown ids, or the catalog error.
    pub async fn toggle_wishlist(&mut self, id: ProductId) -> Result<bool> {
        let product = self.product(id).await?;
        Ok(self.wishlist.toggle(&product))
    }

    /// Add one unit of a wishlisted product to the cart. The product stays
    /// on the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product is not on the wishlist.
    pub fn wishlist_to_cart(&mut self, id: ProductId) -> Result<()> {
        let product = self
            .wishlist
            .wishlist()
            .products()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Wishlist item {id}")))?;
        self.cart.add_one(&product);
        Ok(())
    }

    /// Submit the checkout form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` for an empty cart or an invalid form.
    pub async fn place_order(&mut self, form: &CheckoutForm) -> Result<OrderConfirmation> {
        let confirmation = self.checkout.submit(&mut self.cart, form).await?;
        info!(order_id = %confirmation.order_id, "Order confirmed");
        Ok(confirmation)
    }
}

impl<C> std::fmt::Debug for AppState<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("checkout", &self.checkout)
            .finish_non_exhaustive()
    }
}

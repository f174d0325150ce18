//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart transitions and persistence through a real `FileStore`
//! - `wishlist_scenarios` - Wishlist transitions, toggling and notifications
//! - `checkout_flow` - Browse, add, check out, restart
//!
//! Every [`TestContext`] owns a fresh `tempfile` directory, removed on drop.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use shopfront::cart::CartStore;
use shopfront::catalog::{Catalog, StaticCatalog};
use shopfront::checkout::CheckoutForm;
use shopfront::config::ShopConfig;
use shopfront::notify::RecordingNotifier;
use shopfront::state::AppState;
use shopfront::storage::{CART_SLOT, FileStore, KeyValueStore, Slot, WISHLIST_SLOT};
use shopfront::wishlist::WishlistStore;
use shopfront_core::{PaymentMethod, Product, ProductId};
use tempfile::TempDir;

/// Simulated checkout time used by the scenario tests.
pub const CHECKOUT_DELAY: Duration = Duration::from_secs(2);

/// A temporary storage directory plus a notification recorder.
pub struct TestContext {
    dir: TempDir,
    pub notifications: Arc<RecordingNotifier>,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
            notifications: Arc::new(RecordingNotifier::new()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A fresh `FileStore` handle on the context directory, as a restarted
    /// process would open it.
    #[must_use]
    pub fn store(&self) -> Arc<FileStore> {
        Arc::new(FileStore::new(self.dir()))
    }

    #[must_use]
    pub fn config(&self) -> ShopConfig {
        ShopConfig {
            storage_dir: self.dir().to_path_buf(),
            checkout_delay: CHECKOUT_DELAY,
            ..ShopConfig::default()
        }
    }

    /// Open the full application state on the context directory.
    #[must_use]
    pub fn state(&self) -> AppState<StaticCatalog> {
        AppState::new(
            self.config(),
            self.store(),
            Arc::new(StaticCatalog::new()),
            Some(self.notifications.clone()),
        )
    }

    /// Open just the cart store.
    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::open(Slot::new(self.store(), CART_SLOT))
            .with_notifier(self.notifications.clone())
    }

    /// Open just the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> WishlistStore {
        WishlistStore::open(Slot::new(self.store(), WISHLIST_SLOT))
            .with_notifier(self.notifications.clone())
    }

    /// Write a raw slot value, bypassing the stores.
    ///
    /// # Panics
    ///
    /// Panics if the write fails.
    pub fn write_raw(&self, key: &str, value: &str) {
        self.store()
            .set(key, value)
            .expect("Failed to write raw slot");
    }

    /// Read a raw slot value.
    ///
    /// # Panics
    ///
    /// Panics if the read fails.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.store().get(key).expect("Failed to read raw slot")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a demo catalog product.
///
/// # Panics
///
/// Panics if no product has that id.
pub async fn product(id: i32) -> Product {
    StaticCatalog::new()
        .product(ProductId::new(id))
        .await
        .expect("Static catalog never fails")
        .expect("Unknown demo product")
}

/// A checkout form that passes validation.
#[must_use]
pub fn checkout_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Avery".to_string(),
        last_name: "Quinn".to_string(),
        email: "avery.quinn@example.org".to_string(),
        phone: "+1 555 0199".to_string(),
        address: "42 Harbor Way".to_string(),
        city: "Portland".to_string(),
        state: "ME".to_string(),
        zip_code: "04101".to_string(),
        country: "USA".to_string(),
        payment_method: PaymentMethod::CreditCard,
        card_number: Some(SecretString::from("5555 5555 5555 4444")),
        card_name: "Avery Quinn".to_string(),
        expiry_date: "09/29".to_string(),
        cvv: Some(SecretString::from("321")),
    }
}

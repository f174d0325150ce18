//! Shopfront - demo store session bootstrap.
//!
//! Loads configuration, opens the file-backed store, rehydrates the cart and
//! wishlist, warms the catalog cache and logs what the session holds.
//!
//! Logging honours `RUST_LOG`. Set `SHOPFRONT_LOG_FORMAT=json` for structured
//! JSON output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use shopfront::catalog::{CachedCatalog, StaticCatalog};
use shopfront::config::ShopConfig;
use shopfront::error::AppError;
use shopfront::notify::{SharedNotifier, TracingNotifier};
use shopfront::search::featured;
use shopfront::state::AppState;
use shopfront::storage::{FileStore, KeyValueStore};
use shopfront_core::CategoryFilter;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info".into());

    let json = std::env::var("SHOPFRONT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = ShopConfig::from_env()
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;
    info!(
        checkout_delay = ?config.checkout_delay,
        cache_ttl = ?config.catalog_cache_ttl,
        "Configuration loaded"
    );

    let file_store = FileStore::new(&config.storage_dir);
    info!(storage_dir = %file_store.dir().display(), "Storage opened");
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);
    let catalog = Arc::new(CachedCatalog::new(
        StaticCatalog::new(),
        config.catalog_cache_ttl,
    ));
    let notifier: SharedNotifier = Arc::new(TracingNotifier);
    let state = AppState::new(config, store, catalog, Some(notifier));

    let totals = state.cart_totals();
    let summary = state.order_summary();
    info!(
        cart_items = totals.item_count,
        cart_lines = state.cart().cart().len(),
        subtotal = %summary.subtotal,
        total = %summary.total,
        wishlist_items = state.wishlist().wishlist().len(),
        "Session restored"
    );

    let products = state
        .browse(&CategoryFilter::All, &Default::default())
        .await
        .inspect_err(|e| error!(error = %e, "Catalog unavailable"))?;
    let categories = state.categories().await?;
    info!(
        products = products.len(),
        categories = categories.len(),
        "Catalog ready"
    );
    for product in featured(&products, 3) {
        info!(id = %product.id, name = %product.name, price = %product.price, "Featured");
    }

    Ok(())
}

//! Shopfront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPFRONT_STORAGE_DIR` - Directory for persisted cart/wishlist slots (default: .shopfront)
//! - `SHOPFRONT_CHECKOUT_DELAY_MS` - Simulated order processing time (default: 2000)
//! - `SHOPFRONT_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `SHOPFRONT_TAX_RATE` - Sales tax as a fraction (default: 0.08)
//! - `SHOPFRONT_FREE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 50)
//! - `SHOPFRONT_FLAT_SHIPPING` - Shipping below the threshold (default: 5.99)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use shopfront_core::Price;
use thiserror::Error;

use crate::checkout::PricingConfig;

const DEFAULT_STORAGE_DIR: &str = ".shopfront";
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Where the file-backed key/value store keeps its slots
    pub storage_dir: PathBuf,
    /// How long a simulated checkout takes
    pub checkout_delay: Duration,
    /// Catalog cache entry lifetime
    pub catalog_cache_ttl: Duration,
    /// Tax and shipping rules
    pub pricing: PricingConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            checkout_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
            pricing: PricingConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or a
    /// pricing value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ShopConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env = Env { lookup };

        let storage_dir = env
            .optional("SHOPFRONT_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);
        let checkout_delay = env
            .parse_or("SHOPFRONT_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS)
            .map(Duration::from_millis)?;
        let catalog_cache_ttl = env
            .parse_or(
                "SHOPFRONT_CATALOG_CACHE_TTL_SECS",
                DEFAULT_CATALOG_CACHE_TTL_SECS,
            )
            .map(Duration::from_secs)?;

        let tax_rate = env.parse_or("SHOPFRONT_TAX_RATE", defaults.pricing.tax_rate)?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_TAX_RATE".to_string(),
                format!("must be between 0 and 1 (got {tax_rate})"),
            ));
        }
        let free_shipping_threshold = env.price_or(
            "SHOPFRONT_FREE_SHIPPING_THRESHOLD",
            defaults.pricing.free_shipping_threshold,
        )?;
        let flat_shipping =
            env.price_or("SHOPFRONT_FLAT_SHIPPING", defaults.pricing.flat_shipping)?;

        Ok(Self {
            storage_dir,
            checkout_delay,
            catalog_cache_ttl,
            pricing: PricingConfig {
                tax_rate,
                free_shipping_threshold,
                flat_shipping,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a non-negative dollar amount.
    fn price_or(&self, key: &str, default: Price) -> Result<Price, ConfigError> {
        let amount = self.parse_or(key, default.amount())?;
        if amount.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must not be negative (got {amount})"),
            ));
        }
        Ok(Price::new(amount))
    }
}

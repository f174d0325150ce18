//! Unified error handling.
//!
//! Each concern has its own error type. [`AppError`] wraps them for callers
//! that cross concerns (page glue and the binary). Store mutations never
//! fail: storage problems there are logged and swallowed.

use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the shopfront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Key/value store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the error is an internal fault rather than something the
    /// shopper can fix.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Storage(_) | Self::Catalog(_))
    }

    /// Text safe to show the shopper.
    ///
    /// Internal faults are logged and replaced with a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) => {
                error!(error = %self, "Internal error");
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// Result type alias for shopfront operations.
pub type Result<T> = std::result::Result<T, AppError>;

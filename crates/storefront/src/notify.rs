//! User-visible notifications emitted after successful store mutations.
//!
//! Stores hold an optional [`Notifier`] and call it only after the new state
//! has been swapped in and persisted. Rendering (toasts, status lines) is the
//! consumer's business.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;
use uuid::Uuid;

/// Severity of a notification, mapped to toast styling by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
}

/// Something the shopper should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    AddedToCart { name: String, quantity: u32 },
    AddedToWishlist { name: String },
    RemovedFromWishlist { name: String },
    OrderPlaced { order_id: Uuid },
}

impl Notification {
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        match self {
            Self::RemovedFromWishlist { .. } => NotificationLevel::Info,
            Self::AddedToCart { .. } | Self::AddedToWishlist { .. } | Self::OrderPlaced { .. } => {
                NotificationLevel::Success
            }
        }
    }

    /// Display text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AddedToCart { name, quantity: 1 } => format!("Added {name} to cart"),
            Self::AddedToCart { name, quantity } => format!("Added {quantity} × {name} to cart"),
            Self::AddedToWishlist { name } => format!("Added {name} to wishlist"),
            Self::RemovedFromWishlist { name } => format!("Removed {name} from wishlist"),
            Self::OrderPlaced { .. } => "Order placed successfully!".to_string(),
        }
    }
}

/// Observer invoked after each successful mutation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<F> Notifier for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification);
    }
}

/// Shared handle stores keep to their observer.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Writes every notification to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            level = ?notification.level(),
            message = %notification.message(),
            "Notification"
        );
    }
}

/// Collects notifications in memory for UIs that poll, and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

//! Checkout: order totals, form validation and simulated order placement.
//!
//! No payment is processed. Submitting waits out a fixed processing delay,
//! empties the cart and hands back a confirmation.

mod form;
mod summary;

pub use form::{CheckoutForm, Customer, FieldError, Payment, ShippingAddress, ValidatedOrder};
pub use summary::{OrderSummary, PricingConfig};

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopfront_core::OrderStatus;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::cart::{Cart, CartLine, CartStore};
use crate::notify::{Notification, SharedNotifier};

/// Why an order could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Checkout form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
}

impl From<Vec<FieldError>> for CheckoutError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Invalid(errors)
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub order: ValidatedOrder,
    /// Cart lines at the moment of submission.
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
}

/// Places orders against a [`CartStore`].
#[derive(Clone)]
pub struct Checkout {
    pricing: PricingConfig,
    processing_delay: Duration,
    notifier: Option<SharedNotifier>,
}

impl Checkout {
    #[must_use]
    pub const fn new(pricing: PricingConfig, processing_delay: Duration) -> Self {
        Self {
            pricing,
            processing_delay,
            notifier: None,
        }
    }

    /// Attach the observer told about placed orders.
    #[must_use]
    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Totals for `cart` under the configured pricing.
    #[must_use]
    pub fn summary(&self, cart: &Cart) -> OrderSummary {
        OrderSummary::compute(cart.totals().subtotal, &self.pricing)
    }

    /// Validate the form and place the order.
    ///
    /// On success the cart has been cleared (and the empty cart persisted)
    /// before the confirmation is returned. On error the cart is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or
    /// [`CheckoutError::Invalid`] with every failing field.
    #[instrument(skip_all, fields(lines = cart.cart().len()))]
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.cart().is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let order = form.validate().inspect_err(|errors| {
            warn!(invalid_fields = errors.len(), "Checkout form rejected");
        })?;

        let lines = cart.cart().lines().to_vec();
        let summary = self.summary(cart.cart());

        info!(total = %summary.total, "Processing order");
        tokio::time::sleep(self.processing_delay).await;

        cart.clear();

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            status: OrderStatus::Placed,
            order,
            lines,
            summary,
        };
        info!(order_id = %confirmation.order_id, "Order placed");

        if let Some(notifier) = &self.notifier {
            notifier.notify(&Notification::OrderPlaced {
                order_id: confirmation.order_id,
            });
        }

        Ok(confirmation)
    }
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("pricing", &self.pricing)
            .field("processing_delay", &self.processing_delay)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use shopfront_core::{Price, Product, ProductId};

    use super::form::tests::valid_form;
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::{CART_SLOT, KeyValueStore, MemoryStore, Slot};

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image: String::new(),
            category: "electronics".to_string(),
            rating: 4.0,
            stock: 10,
        }
    }

    fn setup() -> (Checkout, CartStore, Arc<MemoryStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(MemoryStore::new());
        let recorder = Arc::new(RecordingNotifier::new());
        let cart = CartStore::open(Slot::new(store.clone(), CART_SLOT));
        let checkout = Checkout::new(PricingConfig::default(), Duration::from_secs(2))
            .with_notifier(recorder.clone());
        (checkout, cart, store, recorder)
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_clears_cart_and_confirms() {
        let (checkout, mut cart, store, recorder) = setup();
        cart.add(&product(2, 14999), 1);
        cart.add(&product(4, 3495), 1);

        let started = tokio::time::Instant::now();
        let confirmation = checkout.submit(&mut cart, &valid_form()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(confirmation.status, OrderStatus::Placed);
        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.summary.subtotal, Price::from_cents(18494));
        assert_eq!(confirmation.summary.total, Price::from_cents(19974));

        assert!(cart.cart().is_empty());
        assert_eq!(store.get(CART_SLOT).unwrap().as_deref(), Some("[]"));
        assert_eq!(
            recorder.take(),
            vec![Notification::OrderPlaced {
                order_id: confirmation.order_id
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_is_rejected() {
        let (checkout, mut cart, _, recorder) = setup();
        let err = checkout.submit(&mut cart, &valid_form()).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert!(recorder.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_keeps_cart() {
        let (checkout, mut cart, _, recorder) = setup();
        cart.add(&product(1, 49999), 1);

        let form = CheckoutForm {
            zip_code: String::new(),
            ..valid_form()
        };
        let err = checkout.submit(&mut cart, &form).await.unwrap_err();

        let CheckoutError::Invalid(errors) = err else {
            panic!("expected invalid form");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().field, "zip_code");
        assert_eq!(cart.cart().len(), 1);
        assert!(recorder.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_order_gets_a_fresh_id() {
        let (checkout, mut cart, _, _) = setup();
        cart.add_one(&product(7, 1800));
        let first = checkout.submit(&mut cart, &valid_form()).await.unwrap();
        cart.add_one(&product(7, 1800));
        let second = checkout.submit(&mut cart, &valid_form()).await.unwrap();
        assert_ne!(first.order_id, second.order_id);
        assert!(second.placed_at >= first.placed_at);
    }

    #[test]
    fn test_error_display() {
        let err = CheckoutError::Invalid(vec![]);
        assert_eq!(err.to_string(), "Checkout form has 0 invalid field(s)");
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Your cart is empty");
    }
}

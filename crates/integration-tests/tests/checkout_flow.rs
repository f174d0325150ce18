//! End-to-end session: browse, fill the cart, check out, restart.

#![allow(clippy::unwrap_used)]

use shopfront::checkout::{CheckoutError, CheckoutForm, Payment};
use shopfront::error::AppError;
use shopfront::notify::Notification;
use shopfront::search::ProductQuery;
use shopfront::storage::CART_SLOT;
use shopfront_core::{CategoryFilter, OrderStatus, PaymentMethod, Price, ProductId};
use shopfront_integration_tests::{CHECKOUT_DELAY, TestContext, checkout_form};

#[tokio::test(start_paused = true)]
async fn test_full_checkout_session() {
    let ctx = TestContext::new();
    let mut state = ctx.state();

    let kitchen = state
        .browse(&CategoryFilter::from_slug("kitchen"), &ProductQuery::new())
        .await
        .unwrap();
    assert_eq!(kitchen.len(), 2);

    state.add_to_cart(ProductId::new(5), 1).await.unwrap();
    state.add_to_cart(ProductId::new(7), 2).await.unwrap();
    state.toggle_wishlist(ProductId::new(1)).await.unwrap();

    let summary = state.order_summary();
    // 89.50 + 36.00
    assert_eq!(summary.subtotal, Price::from_cents(12550));
    assert!(summary.free_shipping());
    assert_eq!(summary.tax, Price::from_cents(1004));
    assert_eq!(summary.total, Price::from_cents(13554));
    ctx.notifications.take();

    let started = tokio::time::Instant::now();
    let confirmation = state.place_order(&checkout_form()).await.unwrap();
    assert!(started.elapsed() >= CHECKOUT_DELAY);

    assert_eq!(confirmation.status, OrderStatus::Placed);
    assert_eq!(confirmation.summary, summary);
    assert_eq!(confirmation.lines.len(), 2);
    assert_eq!(
        confirmation.order.payment,
        Payment::CreditCard {
            name_on_card: "Avery Quinn".to_string(),
            last_four: "4444".to_string(),
        }
    );
    assert_eq!(
        ctx.notifications.take(),
        vec![Notification::OrderPlaced {
            order_id: confirmation.order_id
        }]
    );

    // A restarted session sees the empty cart but keeps the wishlist.
    drop(state);
    let restarted = ctx.state();
    assert!(restarted.cart().cart().is_empty());
    assert_eq!(ctx.read_raw(CART_SLOT).as_deref(), Some("[]"));
    assert!(restarted.wishlist().contains(ProductId::new(1)));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_checkout_keeps_cart() {
    let ctx = TestContext::new();
    let mut state = ctx.state();
    state.add_to_cart(ProductId::new(3), 1).await.unwrap();

    let form = CheckoutForm {
        email: "not-an-email".to_string(),
        card_number: None,
        ..checkout_form()
    };
    let err = state.place_order(&form).await.unwrap_err();
    let AppError::Checkout(CheckoutError::Invalid(errors)) = err else {
        panic!("expected validation failure");
    };
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["email", "card_number"]);

    let restarted = ctx.state();
    assert_eq!(restarted.cart().cart().quantity_of(ProductId::new(3)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_paypal_checkout_needs_no_card() {
    let ctx = TestContext::new();
    let mut state = ctx.state();
    state.add_to_cart(ProductId::new(6), 1).await.unwrap();

    let form = CheckoutForm {
        payment_method: PaymentMethod::PayPal,
        card_number: None,
        card_name: String::new(),
        expiry_date: String::new(),
        cvv: None,
        ..checkout_form()
    };
    let confirmation = state.place_order(&form).await.unwrap();
    assert_eq!(confirmation.order.payment, Payment::PayPal);
    // 29.99 is under the free shipping threshold
    assert_eq!(confirmation.summary.shipping, Price::from_cents(599));
}

#[tokio::test(start_paused = true)]
async fn test_empty_cart_cannot_check_out() {
    let ctx = TestContext::new();
    let mut state = ctx.state();
    let err = state.place_order(&checkout_form()).await.unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(err.user_message(), "Your cart is empty");
}

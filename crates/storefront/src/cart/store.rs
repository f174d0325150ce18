//! Cart store: authoritative in-memory cart plus its durable mirror.

use std::fmt;

use shopfront_core::{Product, ProductId};
use tracing::debug;

use super::{Cart, CartAction, CartTotals, reduce};
use crate::notify::{Notification, SharedNotifier};
use crate::storage::Slot;

/// The session's shopping cart.
///
/// Every mutation runs to completion synchronously: the next cart is computed
/// with [`reduce`], swapped in whole, written to the slot, and only then is
/// the notifier called. A failed write is logged by the slot and never undoes
/// the in-memory change.
pub struct CartStore {
    cart: Cart,
    slot: Slot<Cart>,
    notifier: Option<SharedNotifier>,
}

impl CartStore {
    /// Open the store, rehydrating from `slot`.
    ///
    /// A missing or malformed stored cart yields an empty cart.
    #[must_use]
    pub fn open(slot: Slot<Cart>) -> Self {
        let cart = slot.load();
        debug!(slot = slot.key(), lines = cart.len(), "Cart rehydrated");
        Self {
            cart,
            slot,
            notifier: None,
        }
    }

    /// Attach the observer called after successful mutations.
    #[must_use]
    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Item count and subtotal of the current cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into an existing line or appends a new one. Non-positive
    /// quantities are ignored entirely: no write and no notification.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        self.dispatch(CartAction::Add {
            product: product.clone(),
            quantity,
        });
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) {
        self.add(product, 1);
    }

    /// Remove a product's line. Unknown ids leave the cart as it was.
    pub fn remove(&mut self, product_id: ProductId) {
        self.dispatch(CartAction::Remove(product_id));
    }

    /// Set a line's quantity in place; `quantity <= 0` removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            product_id,
            quantity,
        });
    }

    /// Empty the cart and write the empty cart to storage.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Apply an action: transition, persist, notify.
    pub fn dispatch(&mut self, action: CartAction) {
        if let CartAction::Add { quantity, .. } = &action
            && *quantity <= 0
        {
            debug!(quantity, "Ignoring non-positive add");
            return;
        }

        self.cart = reduce(&self.cart, &action);
        self.slot.save(&self.cart);
        debug!(?action, lines = self.cart.len(), "Cart updated");

        if let CartAction::Add { product, quantity } = action {
            self.emit(&Notification::AddedToCart {
                name: product.name,
                quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
            });
        }
    }

    fn emit(&self, notification: &Notification) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(notification);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("slot", &self.slot)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

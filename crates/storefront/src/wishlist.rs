//! Wishlist state: a deduplicated, ordered set of saved products.
//!
//! Mirrors the cart's layering: [`reduce`] is the pure transition and reports
//! what actually changed; [`WishlistStore`] swaps the result in, persists and
//! notifies only when something changed.

use std::fmt;

use serde::{Deserialize, Serialize};
use shopfront_core::{Product, ProductId};
use tracing::debug;

use crate::notify::{Notification, SharedNotifier};
use crate::storage::Slot;

/// Saved products in insertion order, unique by id.
///
/// Serialized as a bare JSON array of products; a stored array repeating an
/// id is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Wishlist {
    products: Vec<Product>,
}

/// A stored wishlist listed the same product twice.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("product {0} appears more than once")]
pub struct DuplicateProduct(pub ProductId);

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Saved products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Linear membership test.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<Product>> for Wishlist {
    type Error = DuplicateProduct;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        for (i, product) in products.iter().enumerate() {
            if products.iter().skip(i + 1).any(|p| p.id == product.id) {
                return Err(DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }
}

impl From<Wishlist> for Vec<Product> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.products
    }
}

/// A requested wishlist mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    Add(Product),
    Remove(ProductId),
}

/// What a transition actually did.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistChange {
    Added(Product),
    Removed(Product),
}

/// Compute the next wishlist and the change, if any.
///
/// Adding a saved id or removing an unsaved one returns `None` and leaves the
/// wishlist as it was.
#[must_use]
pub fn reduce(wishlist: &Wishlist, action: &WishlistAction) -> Option<(Wishlist, WishlistChange)> {
    match action {
        WishlistAction::Add(product) => {
            if wishlist.contains(product.id) {
                return None;
            }
            let mut next = wishlist.clone();
            next.products.push(product.clone());
            Some((next, WishlistChange::Added(product.clone())))
        }
        WishlistAction::Remove(product_id) => {
            let index = wishlist.products.iter().position(|p| p.id == *product_id)?;
            let mut next = wishlist.clone();
            let removed = next.products.remove(index);
            Some((next, WishlistChange::Removed(removed)))
        }
    }
}

/// The session's wishlist with its durable mirror.
pub struct WishlistStore {
    wishlist: Wishlist,
    slot: Slot<Wishlist>,
    notifier: Option<SharedNotifier>,
}

impl WishlistStore {
    /// Open the store, rehydrating from `slot`.
    #[must_use]
    pub fn open(slot: Slot<Wishlist>) -> Self {
        let wishlist = slot.load();
        debug!(slot = slot.key(), products = wishlist.len(), "Wishlist rehydrated");
        Self {
            wishlist,
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

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Save a product. Already-saved ids are a silent no-op.
    pub fn add(&mut self, product: &Product) {
        self.dispatch(&WishlistAction::Add(product.clone()));
    }

    /// Remove a saved product. Unsaved ids are a silent no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.dispatch(&WishlistAction::Remove(product_id));
    }

    /// Remove if saved, save otherwise. Returns whether the product is now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Apply an action; persists and notifies only when something changed.
    pub fn dispatch(&mut self, action: &WishlistAction) -> Option<WishlistChange> {
        let Some((next, change)) = reduce(&self.wishlist, action) else {
            debug!(?action, "Wishlist unchanged");
            return None;
        };

        self.wishlist = next;
        self.slot.save(&self.wishlist);
        debug!(?action, products = self.wishlist.len(), "Wishlist updated");

        let notification = match &change {
            WishlistChange::Added(product) => Notification::AddedToWishlist {
                name: product.name.clone(),
            },
            WishlistChange::Removed(product) => Notification::RemovedFromWishlist {
                name: product.name.clone(),
            },
        };
        if let Some(notifier) = &self.notifier {
            notifier.notify(&notification);
        }

        Some(change)
    }
}

impl fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistStore")
            .field("wishlist", &self.wishlist)
            .field("slot", &self.slot)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

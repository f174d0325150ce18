//! Shopping cart state.
//!
//! The cart is split in two layers:
//!
//! - [`Cart`] and [`reduce`]: the pure state transition. `reduce` takes the
//!   current cart and a [`CartAction`] and returns the next cart without
//!   touching storage or notifications, so it is tested on its own.
//! - [`CartStore`]: owns the authoritative in-memory cart, swaps in the result
//!   of `reduce`, writes the durable mirror and notifies the observer.
//!
//! # Invariants
//!
//! - Every line has quantity ≥ 1; a line driven to zero is removed.
//! - At most one line per product id.
//! - Lines keep insertion order; quantity updates never move a line.

mod store;

use serde::{Deserialize, Serialize};
use shopfront_core::{Price, Product, ProductId};

pub use store::CartStore;

/// A product and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered cart lines.
///
/// Serialized as a bare JSON array of `{product, quantity}` objects. A stored
/// array with a zero quantity, a repeated product id or a subtotal outside the
/// decimal range is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Derived cart figures, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub item_count: u64,
    /// Sum of price × quantity over all lines, before tax and shipping.
    pub subtotal: Price,
}

/// Reasons a stored cart is rejected on load.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidCart {
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("product {0} appears on more than one line")]
    DuplicateProduct(ProductId),
    #[error("cart subtotal overflows at product {0}")]
    SubtotalOverflow(ProductId),
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Quantity of a product in the cart (0 when absent).
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Item count and subtotal.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.lines.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal: self.lines.iter().map(CartLine::line_total).sum(),
        }
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = InvalidCart;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut subtotal = Price::zero();
        for (i, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(InvalidCart::ZeroQuantity(line.product.id));
            }
            if lines
                .iter()
                .skip(i + 1)
                .any(|other| other.product.id == line.product.id)
            {
                return Err(InvalidCart::DuplicateProduct(line.product.id));
            }
            subtotal = line
                .product
                .price
                .checked_times(line.quantity)
                .and_then(|total| subtotal.checked_add(total))
                .ok_or(InvalidCart::SubtotalOverflow(line.product.id))?;
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// A requested cart mutation.
///
/// Quantities are signed because callers may pass any integer; the
/// transition decides what non-positive values mean.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add units of a product. Non-positive quantities are ignored.
    Add { product: Product, quantity: i64 },
    /// Remove a product's line, if present.
    Remove(ProductId),
    /// Set a line's quantity in place; ≤ 0 removes it.
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Remove every line.
    Clear,
}

/// Clamp a positive request into the stored quantity range.
fn to_quantity(requested: i64) -> Option<u32> {
    if requested <= 0 {
        None
    } else {
        Some(u32::try_from(requested).unwrap_or(u32::MAX))
    }
}

/// Compute the cart that results from applying `action` to `cart`.
///
/// Pure: the input is left untouched and unknown product ids are no-ops.
#[must_use]
pub fn reduce(cart: &Cart, action: &CartAction) -> Cart {
    match action {
        CartAction::Add { product, quantity } => {
            let Some(quantity) = to_quantity(*quantity) else {
                return cart.clone();
            };
            let mut next = cart.clone();
            match next.position(product.id) {
                Some(i) => {
                    if let Some(line) = next.lines.get_mut(i) {
                        line.quantity = line.quantity.saturating_add(quantity);
                    }
                }
                None => next.lines.push(CartLine {
                    product: product.clone(),
                    quantity,
                }),
            }
            next
        }
        CartAction::Remove(product_id) => Cart {
            lines: cart
                .lines
                .iter()
                .filter(|line| line.product.id != *product_id)
                .cloned()
                .collect(),
        },
        CartAction::SetQuantity {
            product_id,
            quantity,
        } => match to_quantity(*quantity) {
            None => reduce(cart, &CartAction::Remove(*product_id)),
            Some(quantity) => {
                let mut next = cart.clone();
                if let Some(line) = next
                    .lines
                    .iter_mut()
                    .find(|line| line.product.id == *product_id)
                {
                    line.quantity = quantity;
                }
                next
            }
        },
        CartAction::Clear => Cart::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

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

    fn add(cart: &Cart, id: i32, cents: i64, quantity: i64) -> Cart {
        reduce(
            cart,
            &CartAction::Add {
                product: product(id, cents),
                quantity,
            },
        )
    }

    fn ids(cart: &Cart) -> Vec<i32> {
        cart.lines().iter().map(|l| l.product.id.as_i32()).collect()
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let cart = add(&Cart::new(), 1, 1000, 1);
        let cart = add(&cart, 1, 1000, 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 3);
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let cart = add(&Cart::new(), 3, 100, 1);
        let cart = add(&cart, 1, 100, 1);
        let cart = add(&cart, 2, 100, 1);
        let cart = add(&cart, 1, 100, 5);
        assert_eq!(ids(&cart), vec![3, 1, 2]);
    }

    #[test]
    fn test_add_ignores_non_positive_quantity() {
        let cart = add(&Cart::new(), 1, 1000, 2);
        assert_eq!(add(&cart, 1, 1000, 0), cart);
        assert_eq!(add(&cart, 1, 1000, -4), cart);
        assert_eq!(add(&cart, 2, 1000, 0), cart);
    }

    #[test]
    fn test_add_saturates_quantity() {
        let cart = add(&Cart::new(), 1, 1, i64::MAX);
        assert_eq!(cart.quantity_of(ProductId::new(1)), u32::MAX);
        let cart = add(&cart, 1, 1, 10);
        assert_eq!(cart.quantity_of(ProductId::new(1)), u32::MAX);
    }

    #[test]
    fn test_remove_absent_leaves_cart_unchanged() {
        let cart = add(&Cart::new(), 1, 100, 1);
        let cart = add(&cart, 2, 100, 2);

        let after = reduce(&cart, &CartAction::Remove(ProductId::new(99)));
        assert_eq!(after, cart);
        assert_eq!(ids(&after), vec![1, 2]);
    }

    #[test]
    fn test_remove_present() {
        let cart = add(&Cart::new(), 1, 100, 1);
        let cart = add(&cart, 2, 100, 2);
        let cart = add(&cart, 3, 100, 3);

        let after = reduce(&cart, &CartAction::Remove(ProductId::new(2)));
        assert_eq!(ids(&after), vec![1, 3]);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let cart = add(&Cart::new(), 1, 100, 1);
        let cart = add(&cart, 2, 100, 2);

        for quantity in [0, -1, i64::MIN] {
            let after = reduce(
                &cart,
                &CartAction::SetQuantity {
                    product_id: ProductId::new(1),
                    quantity,
                },
            );
            assert_eq!(ids(&after), vec![2]);
        }
    }

    #[test]
    fn test_set_quantity_updates_in_place() {
        let cart = add(&Cart::new(), 4, 100, 1);
        let cart = add(&cart, 5, 100, 3);
        let cart = add(&cart, 6, 100, 1);

        let after = reduce(
            &cart,
            &CartAction::SetQuantity {
                product_id: ProductId::new(5),
                quantity: 1,
            },
        );
        assert_eq!(ids(&after), vec![4, 5, 6]);
        assert_eq!(after.lines()[1].quantity, 1);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let cart = add(&Cart::new(), 1, 100, 1);
        let after = reduce(
            &cart,
            &CartAction::SetQuantity {
                product_id: ProductId::new(2),
                quantity: 7,
            },
        );
        assert_eq!(after, cart);
    }

    #[test]
    fn test_totals() {
        let cart = add(&Cart::new(), 2, 14999, 1);
        let cart = add(&cart, 4, 3495, 1);

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal, Price::from_cents(18494));
    }

    #[test]
    fn test_clear_then_totals_are_zero() {
        let cart = add(&Cart::new(), 1, 999, 3);
        let cleared = reduce(&cart, &CartAction::Clear);
        assert!(cleared.is_empty());
        assert_eq!(cleared.totals(), CartTotals::default());
        assert_eq!(cleared.totals().subtotal, Price::zero());
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let cart = add(&Cart::new(), 1, 100, 1);
        let snapshot = cart.clone();
        let _ = reduce(&cart, &CartAction::Clear);
        let _ = add(&cart, 1, 100, 5);
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_json_is_bare_line_array() {
        let cart = add(&Cart::new(), 2, 14999, 3);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 3);
        assert_eq!(json[0]["product"]["id"], 2);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_json_rejects_broken_invariants() {
        let line = serde_json::to_value(CartLine {
            product: product(1, 100),
            quantity: 1,
        })
        .unwrap();

        let duplicated = serde_json::Value::Array(vec![line.clone(), line.clone()]);
        assert!(serde_json::from_value::<Cart>(duplicated).is_err());

        let mut zero = line;
        zero["quantity"] = 0.into();
        assert!(serde_json::from_value::<Cart>(serde_json::Value::Array(vec![zero])).is_err());
    }

    #[test]
    fn test_json_rejects_overflowing_subtotal() {
        let mut line = serde_json::to_value(CartLine {
            product: product(1, 100),
            quantity: 2,
        })
        .unwrap();
        line["product"]["price"] = "79228162514264337593543950335".into();
        let lines: Vec<CartLine> =
            serde_json::from_value(serde_json::Value::Array(vec![line])).unwrap();

        assert_eq!(
            Cart::try_from(lines),
            Err(InvalidCart::SubtotalOverflow(ProductId::new(1)))
        );
    }

    #[test]
    fn test_json_rejects_overflowing_sum_of_lines() {
        let half = "50000000000000000000000000000";
        let lines: Vec<serde_json::Value> = [1, 2]
            .into_iter()
            .map(|id| {
                let mut line = serde_json::to_value(CartLine {
                    product: product(id, 100),
                    quantity: 1,
                })
                .unwrap();
                line["product"]["price"] = half.into();
                line
            })
            .collect();

        assert!(serde_json::from_value::<Cart>(serde_json::Value::Array(lines)).is_err());
    }

    #[test]
    fn test_totals_saturate_on_huge_prices() {
        let line = CartLine {
            product: Product {
                price: Price::new(rust_decimal::Decimal::MAX),
                ..product(1, 0)
            },
            quantity: 3,
        };
        assert_eq!(line.line_total(), Price::new(rust_decimal::Decimal::MAX));
    }
}

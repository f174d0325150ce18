//! Shipping, tax and order totals.

use rust_decimal::Decimal;
use shopfront_core::Price;

/// Pricing rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Sales tax as a fraction of the subtotal.
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Price,
    /// Shipping charged below the threshold.
    pub flat_shipping: Price,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Price::from_cents(5000),
            flat_shipping: Price::from_cents(599),
        }
    }
}

/// Order totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    /// Rounded to cents.
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Derive shipping, tax and total from a cart subtotal.
    #[must_use]
    pub fn compute(subtotal: Price, pricing: &PricingConfig) -> Self {
        let shipping = if subtotal >= pricing.free_shipping_threshold {
            Price::zero()
        } else {
            pricing.flat_shipping
        };
        let tax = subtotal.scaled(pricing.tax_rate).round_to_cents();

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether shipping is waived.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

//! Status enums for checkout and orders.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the shopper chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
}

impl PaymentMethod {
    /// Wire/form value (`credit-card` or `paypal`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::PayPal => "paypal",
        }
    }

    /// Whether card details must be collected.
    #[must_use]
    pub const fn requires_card(self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a simulated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted; the cart has been cleared.
    #[default]
    Placed,
}

//! Checkout form input and validation.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shopfront_core::{Email, PaymentMethod};

/// A field that failed validation, with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name (e.g. `first_name`).
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str, label: &str) -> Self {
        Self {
            field,
            message: format!("{label} is required"),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw checkout form input as typed by the shopper.
///
/// Card number and CVV are held as secrets and never appear in `Debug`
/// output or in the validated order.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub card_number: Option<SecretString>,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: Option<SecretString>,
}

/// Who placed the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
}

/// Where to ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Payment details kept after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Payment {
    CreditCard {
        name_on_card: String,
        /// Last four digits of the card number.
        last_four: String,
    },
    #[serde(rename = "paypal")]
    PayPal,
}

impl Payment {
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::CreditCard { .. } => PaymentMethod::CreditCard,
            Self::PayPal => PaymentMethod::PayPal,
        }
    }
}

/// A form that passed validation, with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedOrder {
    pub customer: Customer,
    pub shipping: ShippingAddress,
    pub payment: Payment,
}

/// Collects required-field failures in form order.
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: &'static str, label: &str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.errors.push(FieldError::required(field, label));
        }
        value.to_owned()
    }

    fn required_secret(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<&SecretString>,
    ) -> String {
        let value = value.map_or("", |s| s.expose_secret().trim());
        if value.is_empty() {
            self.errors.push(FieldError::required(field, label));
        }
        value.to_owned()
    }
}

fn last_four(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    digits.iter().skip(digits.len().saturating_sub(4)).collect()
}

impl CheckoutForm {
    /// Check every field and report all failures at once.
    ///
    /// # Errors
    ///
    /// Returns every failing field, in form order. Card fields are only
    /// required when paying by card.
    pub fn validate(&self) -> Result<ValidatedOrder, Vec<FieldError>> {
        let mut check = Checker { errors: Vec::new() };

        let first_name = check.required("first_name", "First name", &self.first_name);
        let last_name = check.required("last_name", "Last name", &self.last_name);
        let email = if self.email.trim().is_empty() {
            check.errors.push(FieldError::required("email", "Email"));
            None
        } else if let Ok(email) = Email::parse(&self.email) {
            Some(email)
        } else {
            check.errors.push(FieldError {
                field: "email",
                message: "Invalid email address".to_string(),
            });
            None
        };
        let phone = check.required("phone", "Phone", &self.phone);
        let address = check.required("address", "Address", &self.address);
        let city = check.required("city", "City", &self.city);
        let state = check.required("state", "State", &self.state);
        let zip_code = check.required("zip_code", "Zip code", &self.zip_code);
        let country = check.required("country", "Country", &self.country);

        let payment = if self.payment_method.requires_card() {
            let number =
                check.required_secret("card_number", "Card number", self.card_number.as_ref());
            let name_on_card = check.required("card_name", "Name on card", &self.card_name);
            check.required("expiry_date", "Expiry date", &self.expiry_date);
            check.required_secret("cvv", "CVV", self.cvv.as_ref());
            Payment::CreditCard {
                name_on_card,
                last_four: last_four(&number),
            }
        } else {
            Payment::PayPal
        };

        match email {
            Some(email) if check.errors.is_empty() => Ok(ValidatedOrder {
                customer: Customer {
                    first_name,
                    last_name,
                    email,
                    phone,
                },
                shipping: ShippingAddress {
                    address,
                    city,
                    state,
                    zip_code,
                    country,
                },
                payment,
            }),
            _ => Err(check.errors),
        }
    }
}

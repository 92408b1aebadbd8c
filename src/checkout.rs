//! Checkout form data, validation, and order totals.
//!
//! Validation runs entirely client-side before anything is sent to the
//! backend; a failure aborts checkout with nothing mutated. Card details are
//! validated locally and never included in the order payload, since payment
//! processing lives behind the backend.

use serde::Serialize;
use thiserror::Error;

use crate::money::Price;

/// Sales tax applied to the subtotal, in percent.
pub const SALES_TAX_PERCENT: u64 = 8;

/// Delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingInfo {
    /// Recipient name.
    #[serde(rename = "fullName")]
    pub full_name: String,

    /// Contact email.
    pub email: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,
}

impl ShippingInfo {
    /// Validates the delivery details.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.full_name.trim().chars().count() < 2 {
            return Err(CheckoutError::FullNameTooShort);
        }

        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

        if !valid_email {
            return Err(CheckoutError::InvalidEmail);
        }

        if self.address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        if self.city.trim().is_empty() {
            return Err(CheckoutError::MissingCity);
        }

        Ok(())
    }
}

/// How the order will be paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card payment; details are validated locally only.
    Card {
        /// Card number, spaces allowed.
        number: String,

        /// Expiry in `MM/YY` form.
        expiry: String,

        /// Security code.
        cvc: String,
    },

    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Label sent to the backend in the order payload.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card { .. } => "card",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    /// Validates the payment details.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check. Cash on delivery always passes.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let PaymentMethod::Card {
            number,
            expiry,
            cvc,
        } = self
        else {
            return Ok(());
        };

        let digits = number.chars().filter(|c| !c.is_whitespace()).count();
        let all_digits = number
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace());

        if !all_digits || !(13..=19).contains(&digits) {
            return Err(CheckoutError::InvalidCardNumber);
        }

        let valid_expiry = expiry.split_once('/').is_some_and(|(month, year)| {
            let month_ok = month
                .parse::<u8>()
                .is_ok_and(|m| (1..=12).contains(&m));

            month_ok && year.len() == 2 && year.chars().all(|c| c.is_ascii_digit())
        });

        if !valid_expiry {
            return Err(CheckoutError::InvalidExpiry);
        }

        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidCvc);
        }

        Ok(())
    }
}

/// The amounts that make up an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Price,

    /// Sales tax, rounded half-away-from-zero to the cent.
    pub tax: Price,

    /// Delivery fee; free delivery is simply zero.
    pub delivery_fee: Price,

    /// Subtotal + tax + delivery fee.
    pub total: Price,
}

impl OrderTotals {
    /// Computes tax and the grand total for a cart subtotal.
    #[must_use]
    pub fn compute(subtotal: Price, delivery_fee: Price) -> Self {
        let tax = Price::from_cents((subtotal.cents() * SALES_TAX_PERCENT + 50) / 100);

        OrderTotals {
            subtotal,
            tax,
            delivery_fee,
            total: subtotal.plus(tax).plus(delivery_fee),
        }
    }
}

/// Checkout validation failures, surfaced directly to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Name shorter than two characters.
    #[error("full name must be at least 2 characters")]
    FullNameTooShort,

    /// Email missing or malformed.
    #[error("enter a valid email address")]
    InvalidEmail,

    /// Address left blank.
    #[error("delivery address is required")]
    MissingAddress,

    /// City left blank.
    #[error("city is required")]
    MissingCity,

    /// Card number malformed.
    #[error("enter a valid card number")]
    InvalidCardNumber,

    /// Expiry not in MM/YY form.
    #[error("enter a valid expiry date (MM/YY)")]
    InvalidExpiry,

    /// CVC malformed.
    #[error("enter a valid security code")]
    InvalidCvc,
}

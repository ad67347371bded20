//! Pricing errors.

use rust_decimal::Decimal;

/// Errors returned while building or pricing a line item.
///
/// Every variant is a rejected input: the caller corrects it and prices again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Quantity is zero, negative, or not a whole number.
    #[error("quantity must be a positive whole number, got {input:?}")]
    InvalidQuantity {
        /// The rejected input as given.
        input: String,
    },
    /// A base price or add-on surcharge is negative.
    #[error("price cannot be negative, got {amount}")]
    InvalidPrice {
        /// The rejected amount.
        amount: Decimal,
    },
    /// A discount tier percentage outside `[0, 100)`.
    #[error("discount must be at least 0% and below 100%, got {percent}%")]
    InvalidDiscount {
        /// The rejected percentage.
        percent: Decimal,
    },
    /// A payment method fee below 0%.
    #[error("fee cannot be negative, got {percent}%")]
    InvalidFee {
        /// The rejected percentage.
        percent: Decimal,
    },
    /// An amount left the representable decimal range.
    #[error("amount is too large to price")]
    Overflow,
}

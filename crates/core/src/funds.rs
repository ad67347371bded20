//! Account funding through a payment method.
//!
//! A deposit is priced like any other line item so that it can be aggregated
//! and checked against the funding minimum. The payment method's fee is
//! charged on top of the requested amount and never credited to the account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{BillingUnit, LineItemBreakdown, PriceableItem, PricingError, price};
use crate::types::{PaymentMethodId, round_money};

/// A way to pay for a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
    /// Fee charged on top of the deposit, as a percentage.
    pub fee_percent: Decimal,
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl PaymentMethod {
    /// Compute what the customer pays to deposit `requested_amount`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidPrice`] if `requested_amount` is negative
    /// - [`PricingError::InvalidFee`] if the method's fee is negative
    /// - [`PricingError::Overflow`] if the charge exceeds the decimal range
    pub fn charge(&self, requested_amount: Decimal) -> Result<FundsCharge, PricingError> {
        FundsCharge::compute(requested_amount, self.fee_percent)
    }
}

/// The amounts involved in one deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsCharge {
    /// Amount credited to the account.
    pub requested_amount: Decimal,
    pub fee_percent: Decimal,
    /// `total_charged` minus the rounded requested amount.
    pub fee_amount: Decimal,
    /// `requested × (1 + fee / 100)`, rounded to cents.
    pub total_charged: Decimal,
}

impl FundsCharge {
    /// Compute a deposit charge for a fee percentage.
    ///
    /// # Errors
    ///
    /// See [`PaymentMethod::charge`].
    pub fn compute(requested_amount: Decimal, fee_percent: Decimal) -> Result<Self, PricingError> {
        if requested_amount.is_sign_negative() {
            return Err(PricingError::InvalidPrice {
                amount: requested_amount,
            });
        }

        if fee_percent.is_sign_negative() {
            return Err(PricingError::InvalidFee {
                percent: fee_percent,
            });
        }

        let multiplier = Decimal::ONE_HUNDRED
            .checked_add(fee_percent)
            .and_then(|pct| pct.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::Overflow)?;
        let total_charged = round_money(
            requested_amount
                .checked_mul(multiplier)
                .ok_or(PricingError::Overflow)?,
        );

        Ok(Self {
            requested_amount,
            fee_percent,
            fee_amount: total_charged - round_money(requested_amount),
            total_charged,
        })
    }

    /// A charge with no fee, used while no payment method is selected.
    #[must_use]
    pub fn without_fee(requested_amount: Decimal) -> Self {
        Self {
            requested_amount,
            fee_percent: Decimal::ZERO,
            fee_amount: Decimal::ZERO,
            total_charged: round_money(requested_amount),
        }
    }
}

/// Price a deposit as a single line item.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPrice`] if `amount` is negative.
pub fn deposit_line(amount: Decimal) -> Result<LineItemBreakdown, PricingError> {
    price(
        &PriceableItem::new("Account deposit", amount, 1, BillingUnit::Month),
        &[],
    )
}

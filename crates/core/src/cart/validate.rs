//! Pre-submission validation of an order summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderSummary;

/// A choice the customer must make before an order can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    PaymentMethod,
    Plan,
    Domain,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaymentMethod => write!(f, "payment method"),
            Self::Plan => write!(f, "plan"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

/// Why an order cannot be submitted yet.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The order has no line items.
    #[error("add at least one item before checking out")]
    MinimumItems,
    /// The total is under the flow's minimum charge.
    #[error("the minimum amount is {minimum}, got {total}")]
    BelowMinimum {
        /// The order total.
        total: Decimal,
        /// The flow's minimum.
        minimum: Decimal,
    },
    /// A required choice was not made.
    #[error("select a {selection} before checking out")]
    MissingSelection {
        /// The missing choice.
        selection: Selection,
    },
}

/// Flow-specific requirements an order must meet before submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionConstraints {
    minimum_chargeable: Option<Decimal>,
    requirements: Vec<(Selection, bool)>,
}

impl SubmissionConstraints {
    /// Constraints that only require a non-empty order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `total_due` to be at least `minimum`.
    #[must_use]
    pub const fn with_minimum(mut self, minimum: Decimal) -> Self {
        self.minimum_chargeable = Some(minimum);
        self
    }

    /// Require `selection` to have been made. Requirements are checked in the
    /// order they are added.
    #[must_use]
    pub fn require(mut self, selection: Selection, present: bool) -> Self {
        self.requirements.push((selection, present));
        self
    }

    /// The minimum charge, if any.
    #[must_use]
    pub const fn minimum_chargeable(&self) -> Option<Decimal> {
        self.minimum_chargeable
    }
}

/// Check an order against its flow's constraints.
///
/// Checks run in a fixed order and the first failure is returned: empty order,
/// then minimum amount, then missing selections.
///
/// # Errors
///
/// Returns the first violated [`ValidationError`].
pub fn validate_for_submission(
    summary: &OrderSummary,
    constraints: &SubmissionConstraints,
) -> Result<(), ValidationError> {
    if summary.is_empty() {
        return Err(ValidationError::MinimumItems);
    }

    if let Some(minimum) = constraints.minimum_chargeable
        && summary.total_due < minimum
    {
        return Err(ValidationError::BelowMinimum {
            total: summary.total_due,
            minimum,
        });
    }

    if let Some((selection, _)) = constraints
        .requirements
        .iter()
        .find(|(_, present)| !present)
    {
        return Err(ValidationError::MissingSelection {
            selection: *selection,
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::cart::aggregate;
    use crate::pricing::{BillingUnit, LineItemBreakdown, PriceableItem, price};

    fn summary_of(amount: Decimal) -> OrderSummary {
        let item = PriceableItem::new("deposit", amount, 1, BillingUnit::Month);
        aggregate([price(&item, &[]).unwrap()])
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let summary = aggregate(Vec::<LineItemBreakdown>::new());
        assert_eq!(summary.total_due, Decimal::ZERO);
        assert_eq!(
            validate_for_submission(&summary, &SubmissionConstraints::new()),
            Err(ValidationError::MinimumItems)
        );
    }

    #[test]
    fn test_below_minimum_is_rejected() {
        let constraints = SubmissionConstraints::new().with_minimum(dec!(5));
        assert_eq!(
            validate_for_submission(&summary_of(dec!(3)), &constraints),
            Err(ValidationError::BelowMinimum {
                total: dec!(3),
                minimum: dec!(5),
            })
        );
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let constraints = SubmissionConstraints::new().with_minimum(dec!(5));
        assert!(validate_for_submission(&summary_of(dec!(5)), &constraints).is_ok());
    }

    #[test]
    fn test_missing_selection_is_rejected() {
        let constraints = SubmissionConstraints::new()
            .require(Selection::Plan, true)
            .require(Selection::Domain, false);
        assert_eq!(
            validate_for_submission(&summary_of(dec!(29.99)), &constraints),
            Err(ValidationError::MissingSelection {
                selection: Selection::Domain,
            })
        );
    }

    #[test]
    fn test_checks_run_in_fixed_order() {
        let constraints = SubmissionConstraints::new()
            .with_minimum(dec!(5))
            .require(Selection::PaymentMethod, false);

        // empty beats everything
        assert_eq!(
            validate_for_submission(&OrderSummary::default(), &constraints),
            Err(ValidationError::MinimumItems)
        );
        // minimum beats missing selection
        assert!(matches!(
            validate_for_submission(&summary_of(dec!(3)), &constraints),
            Err(ValidationError::BelowMinimum { .. })
        ));
        assert_eq!(
            validate_for_submission(&summary_of(dec!(50)), &constraints),
            Err(ValidationError::MissingSelection {
                selection: Selection::PaymentMethod,
            })
        );
    }

    #[test]
    fn test_first_missing_selection_wins() {
        let constraints = SubmissionConstraints::new()
            .require(Selection::Plan, false)
            .require(Selection::Domain, false);
        assert_eq!(
            validate_for_submission(&summary_of(dec!(10)), &constraints),
            Err(ValidationError::MissingSelection {
                selection: Selection::Plan,
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingSelection {
                selection: Selection::PaymentMethod
            }
            .to_string(),
            "select a payment method before checking out"
        );
    }
}

//! Order-level aggregation of priced line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::LineItemBreakdown;
use crate::types::round_money;

/// The total of an order and the line items it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrderSummary {
    pub line_items: Vec<LineItemBreakdown>,
    /// Sum of every line's `net_amount`, rounded to cents.
    pub total_due: Decimal,
}

impl OrderSummary {
    /// Whether the order has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    /// Total amount taken off by duration discounts.
    #[must_use]
    pub fn total_savings(&self) -> Decimal {
        self.line_items
            .iter()
            .map(|item| item.discount_amount)
            .sum()
    }

    /// Whether any line item was discounted.
    #[must_use]
    pub fn has_discounts(&self) -> bool {
        self.line_items.iter().any(LineItemBreakdown::is_discounted)
    }
}

/// Build an order summary from priced line items.
///
/// An empty input yields an empty summary with a zero total. The total is the
/// sum of the already rounded net amounts, so it always matches the lines as
/// displayed.
#[must_use]
pub fn aggregate(items: impl IntoIterator<Item = LineItemBreakdown>) -> OrderSummary {
    let line_items: Vec<LineItemBreakdown> = items.into_iter().collect();
    let total_due = round_money(line_items.iter().map(|item| item.net_amount).sum());

    OrderSummary {
        line_items,
        total_due,
    }
}

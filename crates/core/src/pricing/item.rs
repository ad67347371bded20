//! Priceable items and their add-ons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PricingError;
use crate::types::AddOnId;

/// The recurring period a price is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingUnit {
    Month,
    Year,
}

impl BillingUnit {
    /// Label for a number of units, e.g. "1 month" or "3 years".
    #[must_use]
    pub fn describe(self, quantity: u32) -> String {
        let unit = match self {
            Self::Month => "month",
            Self::Year => "year",
        };
        if quantity == 1 {
            format!("{quantity} {unit}")
        } else {
            format!("{quantity} {unit}s")
        }
    }
}

impl std::fmt::Display for BillingUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// An optional extra charged per billing unit of its parent item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    /// Catalog id of the add-on.
    pub id: AddOnId,
    /// Surcharge per billing unit.
    pub unit_surcharge: Decimal,
}

impl AddOn {
    /// Create a new add-on.
    #[must_use]
    pub const fn new(id: AddOnId, unit_surcharge: Decimal) -> Self {
        Self { id, unit_surcharge }
    }
}

/// One purchasable or renewable unit: a domain, a hosting plan, a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceableItem {
    /// What the customer sees on the line (domain name, plan name, ...).
    pub label: String,
    /// Price per billing unit.
    pub base_unit_price: Decimal,
    /// Number of billing units purchased.
    pub quantity: u32,
    /// Billing unit of `base_unit_price` and of every add-on surcharge.
    pub unit: BillingUnit,
    /// Selected add-ons, at most one per id.
    pub add_ons: Vec<AddOn>,
}

impl PriceableItem {
    /// Create an item without add-ons.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        base_unit_price: Decimal,
        quantity: u32,
        unit: BillingUnit,
    ) -> Self {
        Self {
            label: label.into(),
            base_unit_price,
            quantity,
            unit,
            add_ons: Vec::new(),
        }
    }

    /// Add an add-on, replacing any add-on with the same id.
    #[must_use]
    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        match self.add_ons.iter_mut().find(|existing| existing.id == add_on.id) {
            Some(existing) => *existing = add_on,
            None => self.add_ons.push(add_on),
        }
        self
    }
}

/// Parse a user-entered quantity.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] for zero, negative, fractional or
/// non-numeric input.
pub fn parse_quantity(input: &str) -> Result<u32, PricingError> {
    match input.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(PricingError::InvalidQuantity {
            input: input.to_owned(),
        }),
    }
}

//! The pricing computation itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BillingUnit, DiscountTier, PriceableItem, PricingError, select_discount};
use crate::types::{AddOnId, round_money};

/// What a [`ChargeLine`] is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ChargeKind {
    /// The item's own recurring price.
    Base,
    /// A selected add-on.
    AddOn(AddOnId),
}

/// One gross component of a line item, before discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub kind: ChargeKind,
    /// `unit price × quantity`, unrounded.
    pub amount: Decimal,
}

/// The priced result for one [`PriceableItem`].
///
/// Derived on demand and never stored; re-run [`price`] when an input changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemBreakdown {
    pub label: String,
    pub quantity: u32,
    pub unit: BillingUnit,
    /// Base charge first, then add-ons in selection order.
    pub charges: Vec<ChargeLine>,
    /// Sum of `charges` before discount, unrounded.
    pub gross_amount: Decimal,
    pub discount_percent: Decimal,
    /// Rounded gross minus `net_amount`.
    pub discount_amount: Decimal,
    /// Gross after discount, rounded to cents half-up.
    pub net_amount: Decimal,
}

impl LineItemBreakdown {
    /// Whether a duration discount was applied.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_percent > Decimal::ZERO
    }
}

/// Price one item against a discount schedule.
///
/// Gross is `base × quantity` plus `surcharge × quantity` for every add-on;
/// the tier discount applies to the whole gross; rounding happens last.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`] if `item.quantity` is zero
/// - [`PricingError::InvalidPrice`] if the base price or a surcharge is negative
/// - [`PricingError::Overflow`] if an amount exceeds the decimal range
pub fn price(
    item: &PriceableItem,
    tiers: &[DiscountTier],
) -> Result<LineItemBreakdown, PricingError> {
    if item.quantity == 0 {
        return Err(PricingError::InvalidQuantity {
            input: item.quantity.to_string(),
        });
    }

    if item.base_unit_price.is_sign_negative() {
        return Err(PricingError::InvalidPrice {
            amount: item.base_unit_price,
        });
    }

    if let Some(add_on) = item
        .add_ons
        .iter()
        .find(|add_on| add_on.unit_surcharge.is_sign_negative())
    {
        return Err(PricingError::InvalidPrice {
            amount: add_on.unit_surcharge,
        });
    }

    let quantity = Decimal::from(item.quantity);

    let mut charges = Vec::with_capacity(item.add_ons.len() + 1);
    charges.push(ChargeLine {
        kind: ChargeKind::Base,
        amount: checked_mul(item.base_unit_price, quantity)?,
    });
    for add_on in &item.add_ons {
        charges.push(ChargeLine {
            kind: ChargeKind::AddOn(add_on.id.clone()),
            amount: checked_mul(add_on.unit_surcharge, quantity)?,
        });
    }

    let gross_amount = charges.iter().try_fold(Decimal::ZERO, |sum, charge| {
        sum.checked_add(charge.amount).ok_or(PricingError::Overflow)
    })?;

    let discount_percent = select_discount(tiers, item.quantity);
    let remaining = Decimal::ONE_HUNDRED - discount_percent;
    let net_amount = round_money(
        checked_mul(gross_amount, remaining)?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(PricingError::Overflow)?,
    );
    let discount_amount = round_money(gross_amount) - net_amount;

    Ok(LineItemBreakdown {
        label: item.label.clone(),
        quantity: item.quantity,
        unit: item.unit,
        charges,
        gross_amount,
        discount_percent,
        discount_amount,
        net_amount,
    })
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::Overflow)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::pricing::AddOn;

    fn hosting_tiers() -> Vec<DiscountTier> {
        vec![
            DiscountTier::new(12, dec!(10)).unwrap(),
            DiscountTier::new(24, dec!(20)).unwrap(),
        ]
    }

    fn add_on(id: &str, surcharge: Decimal) -> AddOn {
        AddOn::new(AddOnId::parse(id).unwrap(), surcharge)
    }

    #[test]
    fn test_single_unit_below_all_tiers() {
        let item = PriceableItem::new("example.com", dec!(15.99), 1, BillingUnit::Year);
        let breakdown = price(&item, &hosting_tiers()).unwrap();

        assert_eq!(breakdown.discount_percent, Decimal::ZERO);
        assert_eq!(breakdown.net_amount, dec!(15.99));
        assert_eq!(breakdown.discount_amount, Decimal::ZERO);
        assert!(!breakdown.is_discounted());
    }

    #[test]
    fn test_twelve_units_get_ten_percent() {
        let item = PriceableItem::new("Basic", dec!(15.99), 12, BillingUnit::Month);
        let breakdown = price(&item, &hosting_tiers()).unwrap();

        assert_eq!(breakdown.gross_amount, dec!(191.88));
        assert_eq!(breakdown.discount_percent, dec!(10));
        assert_eq!(breakdown.net_amount, dec!(172.69));
        assert_eq!(breakdown.discount_amount, dec!(19.19));
    }

    #[test]
    fn test_add_on_surcharge_is_added_to_gross() {
        let item = PriceableItem::new("Plus", dec!(29.99), 1, BillingUnit::Month)
            .with_add_on(add_on("ssl", dec!(9.99)));
        let breakdown = price(&item, &hosting_tiers()).unwrap();

        assert_eq!(breakdown.gross_amount, dec!(39.98));
        assert_eq!(breakdown.discount_percent, Decimal::ZERO);
        assert_eq!(breakdown.net_amount, dec!(39.98));
        assert_eq!(
            breakdown.charges,
            vec![
                ChargeLine {
                    kind: ChargeKind::Base,
                    amount: dec!(29.99),
                },
                ChargeLine {
                    kind: ChargeKind::AddOn(AddOnId::parse("ssl").unwrap()),
                    amount: dec!(9.99),
                },
            ]
        );
    }

    #[test]
    fn test_discount_applies_to_add_ons_too() {
        // 24 × (29.99 + 9.99 + 4.99) = 1079.28, less 20%
        let item = PriceableItem::new("Plus", dec!(29.99), 24, BillingUnit::Month)
            .with_add_on(add_on("ssl", dec!(9.99)))
            .with_add_on(add_on("backup", dec!(4.99)));
        let breakdown = price(&item, &hosting_tiers()).unwrap();

        assert_eq!(breakdown.gross_amount, dec!(1079.28));
        assert_eq!(breakdown.discount_percent, dec!(20));
        assert_eq!(breakdown.net_amount, dec!(863.42));
    }

    #[test]
    fn test_rounding_is_half_up_and_last() {
        let item = PriceableItem::new("deposit", dec!(10.005), 1, BillingUnit::Month);
        let breakdown = price(&item, &[]).unwrap();

        assert_eq!(breakdown.gross_amount, dec!(10.005));
        assert_eq!(breakdown.net_amount, dec!(10.01));
        assert_eq!(breakdown.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_gross_equals_sum_of_unit_prices_times_quantity() {
        let item = PriceableItem::new("Pro", dec!(59.99), 6, BillingUnit::Month)
            .with_add_on(add_on("ssl", dec!(9.99)))
            .with_add_on(add_on("priority", dec!(14.99)));
        let breakdown = price(&item, &hosting_tiers()).unwrap();

        let expected = dec!(59.99) * dec!(6) + dec!(9.99) * dec!(6) + dec!(14.99) * dec!(6);
        assert_eq!(breakdown.gross_amount, expected);
    }

    #[test]
    fn test_adding_an_add_on_never_lowers_gross() {
        let bare = PriceableItem::new("Pro", dec!(59.99), 12, BillingUnit::Month);
        let with_backup = bare.clone().with_add_on(add_on("backup", dec!(4.99)));
        let with_free = bare.clone().with_add_on(add_on("backup", Decimal::ZERO));

        let bare = price(&bare, &hosting_tiers()).unwrap();
        assert!(price(&with_backup, &hosting_tiers()).unwrap().gross_amount > bare.gross_amount);
        assert_eq!(
            price(&with_free, &hosting_tiers()).unwrap().gross_amount,
            bare.gross_amount
        );
    }

    #[test]
    fn test_price_is_idempotent() {
        let item = PriceableItem::new("Business", dec!(99.99), 36, BillingUnit::Month)
            .with_add_on(add_on("priority", dec!(14.99)));
        let tiers = hosting_tiers();

        assert_eq!(price(&item, &tiers).unwrap(), price(&item, &tiers).unwrap());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let item = PriceableItem::new("example.com", dec!(15.99), 0, BillingUnit::Year);
        assert!(matches!(
            price(&item, &[]),
            Err(PricingError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_negative_base_price_is_rejected() {
        let item = PriceableItem::new("example.com", dec!(-1), 1, BillingUnit::Year);
        assert_eq!(
            price(&item, &[]),
            Err(PricingError::InvalidPrice { amount: dec!(-1) })
        );
    }

    #[test]
    fn test_negative_surcharge_is_rejected() {
        let item = PriceableItem::new("Plus", dec!(29.99), 1, BillingUnit::Month)
            .with_add_on(add_on("ssl", dec!(-9.99)));
        assert_eq!(
            price(&item, &[]),
            Err(PricingError::InvalidPrice { amount: dec!(-9.99) })
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let item = PriceableItem::new("huge", Decimal::MAX, u32::MAX, BillingUnit::Month);
        assert_eq!(price(&item, &[]), Err(PricingError::Overflow));
    }
}

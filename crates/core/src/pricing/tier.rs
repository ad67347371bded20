//! Duration discount tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PricingError;

/// A duration threshold unlocking a fixed discount percentage.
///
/// Tiers are not cumulative: an item gets the discount of the single highest
/// threshold its quantity meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscountTier")]
pub struct DiscountTier {
    minimum_quantity: u32,
    discount_percent: Decimal,
}

#[derive(Deserialize)]
struct RawDiscountTier {
    minimum_quantity: u32,
    discount_percent: Decimal,
}

impl TryFrom<RawDiscountTier> for DiscountTier {
    type Error = PricingError;

    fn try_from(raw: RawDiscountTier) -> Result<Self, Self::Error> {
        Self::new(raw.minimum_quantity, raw.discount_percent)
    }
}

impl DiscountTier {
    /// Create a tier.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidDiscount`] if `discount_percent` is
    /// negative or 100 and above.
    pub fn new(minimum_quantity: u32, discount_percent: Decimal) -> Result<Self, PricingError> {
        if discount_percent.is_sign_negative() || discount_percent >= Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidDiscount {
                percent: discount_percent,
            });
        }
        Ok(Self {
            minimum_quantity,
            discount_percent,
        })
    }

    /// Create a tier from a percentage already known to be in range.
    pub(crate) const fn from_trusted(minimum_quantity: u32, discount_percent: Decimal) -> Self {
        Self {
            minimum_quantity,
            discount_percent,
        }
    }

    /// Smallest quantity that qualifies for this tier.
    #[must_use]
    pub const fn minimum_quantity(&self) -> u32 {
        self.minimum_quantity
    }

    /// Percentage taken off the gross amount.
    #[must_use]
    pub const fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }
}

/// Discount percentage for `quantity` under `tiers`.
///
/// Picks the qualifying tier with the largest threshold; equal thresholds
/// resolve to the larger percentage. Returns zero when no tier qualifies. The
/// order of `tiers` does not matter.
#[must_use]
pub fn select_discount(tiers: &[DiscountTier], quantity: u32) -> Decimal {
    tiers
        .iter()
        .filter(|tier| tier.minimum_quantity <= quantity)
        .max_by(|a, b| {
            a.minimum_quantity
                .cmp(&b.minimum_quantity)
                .then(a.discount_percent.cmp(&b.discount_percent))
        })
        .map_or(Decimal::ZERO, |tier| tier.discount_percent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn tiers(pairs: &[(u32, Decimal)]) -> Vec<DiscountTier> {
        pairs
            .iter()
            .map(|(min, pct)| DiscountTier::new(*min, *pct).unwrap())
            .collect()
    }

    #[test]
    fn test_no_tier_qualifies() {
        let schedule = tiers(&[(12, dec!(10)), (24, dec!(20))]);
        assert_eq!(select_discount(&schedule, 1), Decimal::ZERO);
        assert_eq!(select_discount(&schedule, 11), Decimal::ZERO);
        assert_eq!(select_discount(&[], 36), Decimal::ZERO);
    }

    #[test]
    fn test_highest_threshold_wins() {
        let schedule = tiers(&[(6, dec!(5)), (12, dec!(10)), (24, dec!(20))]);
        assert_eq!(select_discount(&schedule, 6), dec!(5));
        assert_eq!(select_discount(&schedule, 12), dec!(10));
        assert_eq!(select_discount(&schedule, 23), dec!(10));
        assert_eq!(select_discount(&schedule, 36), dec!(20));
    }

    #[test]
    fn test_tier_order_is_irrelevant() {
        let ascending = tiers(&[(12, dec!(10)), (24, dec!(20))]);
        let descending = tiers(&[(24, dec!(20)), (12, dec!(10))]);
        for quantity in [1, 12, 13, 24, 36] {
            assert_eq!(
                select_discount(&ascending, quantity),
                select_discount(&descending, quantity)
            );
        }
    }

    #[test]
    fn test_equal_thresholds_take_larger_discount() {
        let schedule = tiers(&[(12, dec!(10)), (12, dec!(15)), (12, dec!(5))]);
        assert_eq!(select_discount(&schedule, 12), dec!(15));
    }

    #[test]
    fn test_discount_is_monotonic_in_quantity() {
        let schedule = tiers(&[(6, dec!(5)), (12, dec!(10)), (24, dec!(20))]);
        let mut previous = Decimal::ZERO;
        for quantity in 1..=48 {
            let current = select_discount(&schedule, quantity);
            assert!(current >= previous, "discount dropped at {quantity}");
            previous = current;
        }
    }

    #[test]
    fn test_new_rejects_out_of_range_percent() {
        assert!(matches!(
            DiscountTier::new(12, dec!(-1)),
            Err(PricingError::InvalidDiscount { .. })
        ));
        assert!(matches!(
            DiscountTier::new(12, dec!(100)),
            Err(PricingError::InvalidDiscount { .. })
        ));
        assert!(DiscountTier::new(12, dec!(99.99)).is_ok());
        assert!(DiscountTier::new(0, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let tier: DiscountTier =
            serde_json::from_str(r#"{"minimum_quantity": 24, "discount_percent": "20"}"#).unwrap();
        assert_eq!(tier.minimum_quantity(), 24);
        assert_eq!(tier.discount_percent(), dec!(20));

        assert!(
            serde_json::from_str::<DiscountTier>(
                r#"{"minimum_quantity": 24, "discount_percent": "150"}"#
            )
            .is_err()
        );
    }
}

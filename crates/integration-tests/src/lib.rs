//! Integration tests for Hostpanel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hostpanel-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing_scenarios` - Line item pricing, rounding and aggregation
//! - `order_flows` - Quote and checkout for every purchase flow
//! - `catalog_config` - The example YAML price list
//!
//! This crate only holds shared fixtures.

use hostpanel_core::{AddOn, AddOnId, BillingUnit, DiscountTier, PriceableItem};
use rust_decimal::Decimal;

/// The example price list shipped with the CLI.
pub const EXAMPLE_CATALOG_YAML: &str = include_str!("../../cli/config/catalog.example.yaml");

/// The hosting order tiers: 10% from 12 months, 20% from 24 months.
///
/// # Panics
///
/// Never; the tier values are valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn hosting_order_tiers() -> Vec<DiscountTier> {
    vec![
        DiscountTier::new(12, Decimal::TEN).unwrap(),
        DiscountTier::new(24, Decimal::from(20)).unwrap(),
    ]
}

/// A monthly hosting item with the given add-on surcharges.
///
/// # Panics
///
/// Panics if an add-on id is not a valid slug.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn monthly_item(base: Decimal, months: u32, add_ons: &[(&str, Decimal)]) -> PriceableItem {
    add_ons.iter().fold(
        PriceableItem::new("Hosting", base, months, BillingUnit::Month),
        |item, (id, surcharge)| {
            item.with_add_on(AddOn::new(AddOnId::parse(id).unwrap(), *surcharge))
        },
    )
}

//! Line item pricing.
//!
//! [`price`] turns one [`PriceableItem`] and a discount schedule into a
//! [`LineItemBreakdown`]. The computation order is fixed: base and add-on
//! charges are summed into the gross amount, the duration discount is applied
//! to that gross, and the result is rounded to cents last.

pub mod engine;
pub mod error;
pub mod item;
pub mod tier;

pub use engine::{ChargeKind, ChargeLine, LineItemBreakdown, price};
pub use error::PricingError;
pub use item::{AddOn, BillingUnit, PriceableItem, parse_quantity};
pub use tier::{DiscountTier, select_discount};

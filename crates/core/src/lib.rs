//! Hostpanel Core - Pricing and order computation for the customer panel.
//!
//! This crate provides the business rules behind every purchase screen of the
//! panel:
//! - domain registration and renewal
//! - hosting orders and hosting renewals
//! - account funding through a payment method
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no logging,
//! no clocks. Every quote is derived afresh from the caller's raw selections, so
//! the same selections always produce the same breakdown.
//!
//! # Modules
//!
//! - [`pricing`] - Line item pricing with duration discount tiers and add-ons
//! - [`cart`] - Order totals and pre-submission validation
//! - [`funds`] - Payment method fees for account deposits
//! - [`catalog`] - Plans, TLDs, add-ons, periods and tiers offered for sale
//! - [`quote`] - Per-flow quoting on top of the catalog
//! - [`types`] - Newtype wrappers for ids, money, domain names and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod funds;
pub mod pricing;
pub mod quote;
pub mod types;

pub use cart::{
    OrderSummary, Selection, SubmissionConstraints, ValidationError, aggregate,
    validate_for_submission,
};
pub use catalog::{Catalog, CatalogError};
pub use funds::{FundsCharge, PaymentMethod};
pub use pricing::{
    AddOn, BillingUnit, DiscountTier, LineItemBreakdown, PriceableItem, PricingError, price,
};
pub use quote::QuoteError;
pub use types::*;

//! Core types for Hostpanel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod domain_name;
pub mod id;
pub mod money;
pub mod status;

pub use domain_name::{DomainName, DomainNameError};
pub use id::*;
pub use money::{CurrencyCode, Price, round_money};
pub use status::RenewalUrgency;

//! What the panel sells and at what price.
//!
//! A [`Catalog`] holds the TLD price list, hosting plans, add-ons, the billing
//! periods offered by each flow, the duration discount schedules, the payment
//! methods accepted for deposits, and the deposit minimum. It deserializes
//! from any serde format; [`Catalog::standard`] is the built-in price list.

use std::collections::HashSet;
use std::hash::Hash;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::funds::PaymentMethod;
use crate::pricing::{BillingUnit, DiscountTier};
use crate::types::{AddOnId, CurrencyCode, PaymentMethodId, PlanId};

/// Catalog id of the WHOIS privacy add-on offered with domain registrations.
pub const WHOIS_PRIVACY: &str = "whois-privacy";

/// Errors found while checking a catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("TLD {0} is listed more than once")]
    DuplicateTld(String),
    #[error("hosting plan {0} is listed more than once")]
    DuplicatePlan(PlanId),
    #[error("add-on {0} is listed more than once")]
    DuplicateAddOn(AddOnId),
    #[error("payment method {0} is listed more than once")]
    DuplicatePaymentMethod(PaymentMethodId),
    #[error("TLD {0:?} must be a dot followed by lowercase letters, digits or hyphens")]
    InvalidTld(String),
    #[error("{item} has a negative price: {amount}")]
    NegativePrice { item: String, amount: Decimal },
    #[error("payment method {method} has a negative fee: {percent}%")]
    NegativeFee {
        method: PaymentMethodId,
        percent: Decimal,
    },
    #[error("no {flow} periods are offered")]
    NoPeriods { flow: &'static str },
    #[error("{flow} periods cannot include 0")]
    ZeroPeriod { flow: &'static str },
    #[error("funds minimum cannot be negative: {0}")]
    NegativeMinimum(Decimal),
}

/// Yearly prices for one domain extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldPricing {
    /// Extension with its leading dot, e.g. `.com`.
    pub tld: String,
    pub registration_price: Decimal,
    pub renewal_price: Decimal,
}

/// A hosting plan billed monthly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingPlan {
    pub id: PlanId,
    pub name: String,
    pub monthly_price: Decimal,
    #[serde(default)]
    pub popular: bool,
}

/// An add-on and the billing unit its surcharge is quoted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnOffer {
    pub id: AddOnId,
    pub name: String,
    pub unit_surcharge: Decimal,
    pub unit: BillingUnit,
}

/// Billing periods a customer can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOptions {
    /// Registration and renewal lengths for domains, in years.
    pub domain_years: Vec<u32>,
    /// Order and renewal lengths for hosting, in months.
    pub hosting_months: Vec<u32>,
}

/// Duration discount schedules, one per flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiscountSchedules {
    #[serde(default)]
    pub domain_registration: Vec<DiscountTier>,
    #[serde(default)]
    pub domain_renewal: Vec<DiscountTier>,
    #[serde(default)]
    pub hosting_order: Vec<DiscountTier>,
    #[serde(default)]
    pub hosting_renewal: Vec<DiscountTier>,
}

/// The full price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub currency: CurrencyCode,
    pub tlds: Vec<TldPricing>,
    pub hosting_plans: Vec<HostingPlan>,
    pub add_ons: Vec<AddOnOffer>,
    pub periods: PeriodOptions,
    #[serde(default)]
    pub discounts: DiscountSchedules,
    pub payment_methods: Vec<PaymentMethod>,
    pub funds_minimum: Decimal,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The built-in price list.
    ///
    /// The `business` plan price is a placeholder: the panel's hosting list
    /// only shows the first three plans in dollars.
    #[must_use]
    pub fn standard() -> Self {
        let tld = |tld: &str, price: Decimal| TldPricing {
            tld: tld.to_owned(),
            registration_price: price,
            renewal_price: price,
        };
        let plan = |id: &'static str, name: &str, monthly_price: Decimal, popular: bool| {
            HostingPlan {
                id: PlanId::from_static(id),
                name: name.to_owned(),
                monthly_price,
                popular,
            }
        };
        let add_on = |id: &'static str, name: &str, unit_surcharge: Decimal, unit| AddOnOffer {
            id: AddOnId::from_static(id),
            name: name.to_owned(),
            unit_surcharge,
            unit,
        };
        let method = |id: &'static str, name: &str, fee_percent: Decimal| PaymentMethod {
            id: PaymentMethodId::from_static(id),
            name: name.to_owned(),
            fee_percent,
            available: true,
        };
        let tier = |months: u32, percent: i64| DiscountTier::from_trusted(months, Decimal::from(percent));

        Self {
            currency: CurrencyCode::USD,
            tlds: vec![
                tld(".com", Decimal::new(1599, 2)),
                tld(".org", Decimal::new(1850, 2)),
                tld(".net", Decimal::new(1699, 2)),
                tld(".bi", Decimal::new(2500, 2)),
                tld(".info", Decimal::new(1299, 2)),
            ],
            hosting_plans: vec![
                plan("basic", "Basic Hosting", Decimal::new(1599, 2), false),
                plan("plus", "Plus Hosting", Decimal::new(2999, 2), true),
                plan("pro", "Pro Hosting", Decimal::new(5999, 2), false),
                plan("business", "Business Hosting", Decimal::new(9999, 2), false),
            ],
            add_ons: vec![
                add_on("ssl", "Premium SSL certificate", Decimal::new(999, 2), BillingUnit::Month),
                add_on("backup", "Daily backups", Decimal::new(499, 2), BillingUnit::Month),
                add_on("priority", "Priority support", Decimal::new(1499, 2), BillingUnit::Month),
                add_on(WHOIS_PRIVACY, "WHOIS privacy", Decimal::new(999, 2), BillingUnit::Year),
            ],
            periods: PeriodOptions {
                domain_years: vec![1, 2, 3, 5, 10],
                hosting_months: vec![1, 3, 6, 12, 24, 36],
            },
            discounts: DiscountSchedules {
                domain_registration: Vec::new(),
                domain_renewal: Vec::new(),
                hosting_order: vec![tier(12, 10), tier(24, 20)],
                hosting_renewal: vec![tier(6, 5), tier(12, 10), tier(24, 20)],
            },
            payment_methods: vec![
                method("credit", "Account credit", Decimal::ZERO),
                method("cash", "Cash", Decimal::ZERO),
                method("efeza", "eFeza", Decimal::new(25, 1)),
                method("flutterwave", "Flutterwave", Decimal::new(35, 1)),
            ],
            funds_minimum: Decimal::from(5),
        }
    }

    /// Check the catalog for duplicates and out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for pricing in &self.tlds {
            if !is_valid_tld(&pricing.tld) {
                return Err(CatalogError::InvalidTld(pricing.tld.clone()));
            }
            non_negative(&pricing.tld, pricing.registration_price)?;
            non_negative(&pricing.tld, pricing.renewal_price)?;
        }
        first_duplicate(self.tlds.iter().map(|t| &t.tld))
            .map_or(Ok(()), |tld| Err(CatalogError::DuplicateTld(tld.clone())))?;

        for plan in &self.hosting_plans {
            non_negative(&plan.name, plan.monthly_price)?;
        }
        first_duplicate(self.hosting_plans.iter().map(|p| &p.id))
            .map_or(Ok(()), |id| Err(CatalogError::DuplicatePlan(id.clone())))?;

        for add_on in &self.add_ons {
            non_negative(&add_on.name, add_on.unit_surcharge)?;
        }
        first_duplicate(self.add_ons.iter().map(|a| &a.id))
            .map_or(Ok(()), |id| Err(CatalogError::DuplicateAddOn(id.clone())))?;

        for method in &self.payment_methods {
            if method.fee_percent.is_sign_negative() {
                return Err(CatalogError::NegativeFee {
                    method: method.id.clone(),
                    percent: method.fee_percent,
                });
            }
        }
        first_duplicate(self.payment_methods.iter().map(|m| &m.id)).map_or(Ok(()), |id| {
            Err(CatalogError::DuplicatePaymentMethod(id.clone()))
        })?;

        check_periods("domain", &self.periods.domain_years)?;
        check_periods("hosting", &self.periods.hosting_months)?;

        if self.funds_minimum.is_sign_negative() {
            return Err(CatalogError::NegativeMinimum(self.funds_minimum));
        }

        Ok(())
    }

    /// Prices for a domain extension such as `.com`.
    #[must_use]
    pub fn tld(&self, tld: &str) -> Option<&TldPricing> {
        self.tlds.iter().find(|pricing| pricing.tld == tld)
    }

    /// A hosting plan by id.
    #[must_use]
    pub fn plan(&self, id: &PlanId) -> Option<&HostingPlan> {
        self.hosting_plans.iter().find(|plan| &plan.id == id)
    }

    /// An add-on by id.
    #[must_use]
    pub fn add_on(&self, id: &AddOnId) -> Option<&AddOnOffer> {
        self.add_ons.iter().find(|add_on| &add_on.id == id)
    }

    /// A payment method by id.
    #[must_use]
    pub fn payment_method(&self, id: &PaymentMethodId) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|method| &method.id == id)
    }
}

/// A TLD is a single label after the dot, since [`DomainName::tld`](crate::types::DomainName::tld) only
/// returns the last label.
fn is_valid_tld(tld: &str) -> bool {
    tld.strip_prefix('.').is_some_and(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    })
}

fn non_negative(item: &str, amount: Decimal) -> Result<(), CatalogError> {
    if amount.is_sign_negative() {
        return Err(CatalogError::NegativePrice {
            item: item.to_owned(),
            amount,
        });
    }
    Ok(())
}

fn check_periods(flow: &'static str, periods: &[u32]) -> Result<(), CatalogError> {
    if periods.is_empty() {
        return Err(CatalogError::NoPeriods { flow });
    }
    if periods.contains(&0) {
        return Err(CatalogError::ZeroPeriod { flow });
    }
    Ok(())
}

fn first_duplicate<'a, T: Eq + Hash + 'a>(
    mut items: impl Iterator<Item = &'a T>,
) -> Option<&'a T> {
    let mut seen = HashSet::new();
    items.find(|item| !seen.insert(*item))
}

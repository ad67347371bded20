//! Per-flow quoting on top of a [`Catalog`].
//!
//! Each purchase screen of the panel has a quote function and a checkout
//! function. Quoting turns the customer's raw selections into an
//! [`OrderSummary`]; checkout does the same and then applies the flow's
//! submission constraints. Nothing is cached: call again whenever a selection
//! changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{
    OrderSummary, Selection, SubmissionConstraints, ValidationError, aggregate,
    validate_for_submission,
};
use crate::catalog::{Catalog, TldPricing, WHOIS_PRIVACY};
use crate::funds::{FundsCharge, deposit_line};
use crate::pricing::{AddOn, BillingUnit, LineItemBreakdown, PriceableItem, PricingError, price};
use crate::types::{AddOnId, DomainName, DomainNameError, PaymentMethodId, PlanId};

/// Errors returned by quote and checkout functions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid domain name: {0}")]
    InvalidDomain(#[from] DomainNameError),

    #[error("extension {0} is not offered")]
    UnknownTld(String),

    #[error("hosting plan {0} does not exist")]
    UnknownPlan(PlanId),

    #[error("add-on {0} does not exist")]
    UnknownAddOn(AddOnId),

    #[error("add-on {add_on} is billed per {found}, but the item is billed per {expected}")]
    AddOnUnitMismatch {
        add_on: AddOnId,
        expected: BillingUnit,
        found: BillingUnit,
    },

    #[error("a period of {period} is not offered (choose from {allowed:?})")]
    UnsupportedPeriod { period: u32, allowed: Vec<u32> },

    #[error("payment method {0} does not exist")]
    UnknownPaymentMethod(PaymentMethodId),

    #[error("payment method {0} is currently unavailable")]
    PaymentMethodUnavailable(PaymentMethodId),
}

/// A domain in the registration cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRegistration {
    pub domain: DomainName,
    pub years: u32,
    #[serde(default)]
    pub whois_privacy: bool,
}

/// A registered domain selected for renewal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRenewal {
    pub domain: DomainName,
    pub years: u32,
}

/// The hosting order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingOrder {
    pub plan: Option<PlanId>,
    /// Domain the hosting is for; required at checkout only.
    pub domain: Option<DomainName>,
    pub months: u32,
    #[serde(default)]
    pub add_ons: Vec<AddOnId>,
}

/// An existing hosting service selected for renewal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingRenewal {
    pub label: String,
    /// The service's current monthly renewal price.
    pub monthly_price: Decimal,
    pub months: u32,
}

/// The add-funds form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsRequest {
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethodId>,
}

/// A deposit quote: what gets credited and what gets charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsQuote {
    pub deposit: OrderSummary,
    pub charge: FundsCharge,
}

impl Catalog {
    /// Quote a domain registration cart.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for an unsupported period, an extension that
    /// is not offered, or a pricing failure.
    pub fn quote_domain_registrations(
        &self,
        cart: &[DomainRegistration],
    ) -> Result<OrderSummary, QuoteError> {
        let lines = cart
            .iter()
            .map(|registration| self.price_domain_registration(registration))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(aggregate(lines))
    }

    /// Quote a domain registration cart and check it can be submitted.
    ///
    /// # Errors
    ///
    /// As [`Self::quote_domain_registrations`], plus
    /// [`ValidationError::MinimumItems`] for an empty cart.
    pub fn checkout_domain_registrations(
        &self,
        cart: &[DomainRegistration],
    ) -> Result<OrderSummary, QuoteError> {
        let summary = self.quote_domain_registrations(cart)?;
        validate_for_submission(&summary, &SubmissionConstraints::new())?;
        Ok(summary)
    }

    /// Quote a set of domain renewals.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for an unsupported period, an extension that
    /// is not offered, or a pricing failure.
    pub fn quote_domain_renewals(
        &self,
        renewals: &[DomainRenewal],
    ) -> Result<OrderSummary, QuoteError> {
        let lines = renewals
            .iter()
            .map(|renewal| -> Result<LineItemBreakdown, QuoteError> {
                ensure_period(renewal.years, &self.periods.domain_years)?;
                let pricing = self.tld_for(&renewal.domain)?;
                let item = PriceableItem::new(
                    renewal.domain.as_str(),
                    pricing.renewal_price,
                    renewal.years,
                    BillingUnit::Year,
                );
                Ok(price(&item, &self.discounts.domain_renewal)?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(aggregate(lines))
    }

    /// Quote domain renewals and check at least one domain is selected.
    ///
    /// # Errors
    ///
    /// As [`Self::quote_domain_renewals`], plus
    /// [`ValidationError::MinimumItems`] when nothing is selected.
    pub fn checkout_domain_renewals(
        &self,
        renewals: &[DomainRenewal],
    ) -> Result<OrderSummary, QuoteError> {
        let summary = self.quote_domain_renewals(renewals)?;
        validate_for_submission(&summary, &SubmissionConstraints::new())?;
        Ok(summary)
    }

    /// Quote the hosting order form.
    ///
    /// No plan selected yields an empty summary.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for an unknown plan or add-on, an add-on
    /// billed in another unit, an unsupported period, or a pricing failure.
    pub fn quote_hosting_order(&self, order: &HostingOrder) -> Result<OrderSummary, QuoteError> {
        let Some(plan_id) = &order.plan else {
            return Ok(OrderSummary::default());
        };

        ensure_period(order.months, &self.periods.hosting_months)?;
        let plan = self
            .plan(plan_id)
            .ok_or_else(|| QuoteError::UnknownPlan(plan_id.clone()))?;

        let mut item = PriceableItem::new(
            plan.name.as_str(),
            plan.monthly_price,
            order.months,
            BillingUnit::Month,
        );
        for add_on_id in &order.add_ons {
            item = item.with_add_on(self.add_on_for(add_on_id, BillingUnit::Month)?);
        }

        Ok(aggregate([price(&item, &self.discounts.hosting_order)?]))
    }

    /// Quote the hosting order form and check plan and domain are chosen.
    ///
    /// # Errors
    ///
    /// As [`Self::quote_hosting_order`], plus [`ValidationError::MinimumItems`]
    /// without a plan and [`ValidationError::MissingSelection`] without a
    /// domain.
    pub fn checkout_hosting_order(&self, order: &HostingOrder) -> Result<OrderSummary, QuoteError> {
        let summary = self.quote_hosting_order(order)?;
        let constraints = SubmissionConstraints::new()
            .require(Selection::Plan, order.plan.is_some())
            .require(Selection::Domain, order.domain.is_some());
        validate_for_submission(&summary, &constraints)?;
        Ok(summary)
    }

    /// Quote a set of hosting renewals.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for an unsupported period or a pricing failure.
    pub fn quote_hosting_renewals(
        &self,
        renewals: &[HostingRenewal],
    ) -> Result<OrderSummary, QuoteError> {
        let lines = renewals
            .iter()
            .map(|renewal| -> Result<LineItemBreakdown, QuoteError> {
                ensure_period(renewal.months, &self.periods.hosting_months)?;
                let item = PriceableItem::new(
                    renewal.label.as_str(),
                    renewal.monthly_price,
                    renewal.months,
                    BillingUnit::Month,
                );
                Ok(price(&item, &self.discounts.hosting_renewal)?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(aggregate(lines))
    }

    /// Quote hosting renewals and check at least one service is selected.
    ///
    /// # Errors
    ///
    /// As [`Self::quote_hosting_renewals`], plus
    /// [`ValidationError::MinimumItems`] when nothing is selected.
    pub fn checkout_hosting_renewals(
        &self,
        renewals: &[HostingRenewal],
    ) -> Result<OrderSummary, QuoteError> {
        let summary = self.quote_hosting_renewals(renewals)?;
        validate_for_submission(&summary, &SubmissionConstraints::new())?;
        Ok(summary)
    }

    /// Quote the add-funds form.
    ///
    /// While no payment method is selected the charge carries no fee.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for a negative amount, an unknown or
    /// unavailable payment method, or a pricing failure.
    pub fn quote_funds(&self, request: &FundsRequest) -> Result<FundsQuote, QuoteError> {
        let deposit = aggregate([deposit_line(request.amount)?]);

        let charge = match &request.payment_method {
            Some(id) => {
                let method = self
                    .payment_method(id)
                    .ok_or_else(|| QuoteError::UnknownPaymentMethod(id.clone()))?;
                if !method.available {
                    return Err(QuoteError::PaymentMethodUnavailable(id.clone()));
                }
                method.charge(request.amount)?
            }
            None => FundsCharge::without_fee(request.amount),
        };

        Ok(FundsQuote { deposit, charge })
    }

    /// Quote the add-funds form and check the minimum and payment method.
    ///
    /// # Errors
    ///
    /// As [`Self::quote_funds`], plus [`ValidationError::BelowMinimum`] under
    /// the catalog's funds minimum and [`ValidationError::MissingSelection`]
    /// without a payment method.
    pub fn checkout_funds(&self, request: &FundsRequest) -> Result<FundsQuote, QuoteError> {
        let quote = self.quote_funds(request)?;
        let constraints = SubmissionConstraints::new()
            .with_minimum(self.funds_minimum)
            .require(Selection::PaymentMethod, request.payment_method.is_some());
        validate_for_submission(&quote.deposit, &constraints)?;
        Ok(quote)
    }

    fn price_domain_registration(
        &self,
        registration: &DomainRegistration,
    ) -> Result<LineItemBreakdown, QuoteError> {
        ensure_period(registration.years, &self.periods.domain_years)?;
        let pricing = self.tld_for(&registration.domain)?;

        let mut item = PriceableItem::new(
            registration.domain.as_str(),
            pricing.registration_price,
            registration.years,
            BillingUnit::Year,
        );
        if registration.whois_privacy {
            let privacy = AddOnId::from_static(WHOIS_PRIVACY);
            item = item.with_add_on(self.add_on_for(&privacy, BillingUnit::Year)?);
        }

        Ok(price(&item, &self.discounts.domain_registration)?)
    }

    fn tld_for(&self, domain: &DomainName) -> Result<&TldPricing, QuoteError> {
        self.tld(domain.tld())
            .ok_or_else(|| QuoteError::UnknownTld(domain.tld().to_owned()))
    }

    fn add_on_for(&self, id: &AddOnId, unit: BillingUnit) -> Result<AddOn, QuoteError> {
        let offer = self
            .add_on(id)
            .ok_or_else(|| QuoteError::UnknownAddOn(id.clone()))?;
        if offer.unit != unit {
            return Err(QuoteError::AddOnUnitMismatch {
                add_on: id.clone(),
                expected: unit,
                found: offer.unit,
            });
        }
        Ok(AddOn::new(offer.id.clone(), offer.unit_surcharge))
    }
}

fn ensure_period(period: u32, allowed: &[u32]) -> Result<(), QuoteError> {
    if period == 0 {
        return Err(PricingError::InvalidQuantity {
            input: period.to_string(),
        }
        .into());
    }
    if !allowed.contains(&period) {
        return Err(QuoteError::UnsupportedPeriod {
            period,
            allowed: allowed.to_vec(),
        });
    }
    Ok(())
}

//! Domain registration and renewal commands.

use chrono::{NaiveDate, Utc};
use hostpanel_core::quote::{DomainRegistration, DomainRenewal};
use hostpanel_core::{DomainName, QuoteError, RenewalUrgency};

use super::{CommandError, Context};
use crate::output::QuoteDocument;

fn parse_domains(domains: &[String]) -> Result<Vec<DomainName>, QuoteError> {
    domains
        .iter()
        .map(|domain| DomainName::parse(domain).map_err(QuoteError::from))
        .collect()
}

/// Quote, and unless `--quote-only` is set check out, a registration cart.
///
/// # Errors
///
/// Returns `CommandError::Quote` for an invalid domain, an extension or
/// period that is not offered, or an empty cart at checkout.
pub fn register(
    ctx: &Context<'_>,
    domains: &[String],
    years: u32,
    whois_privacy: bool,
) -> Result<(), CommandError> {
    let cart: Vec<DomainRegistration> = parse_domains(domains)?
        .into_iter()
        .map(|domain| DomainRegistration {
            domain,
            years,
            whois_privacy,
        })
        .collect();

    let summary = if ctx.check {
        ctx.catalog.checkout_domain_registrations(&cart)?
    } else {
        ctx.catalog.quote_domain_registrations(&cart)?
    };

    tracing::info!(
        domains = cart.len(),
        years,
        whois_privacy,
        total = %summary.total_due,
        "Quoted domain registration"
    );

    ctx.print(&QuoteDocument::new(
        "domain-registration",
        ctx.catalog.currency,
        &summary,
    ))
}

/// Quote, and unless `--quote-only` is set check out, domain renewals.
///
/// With `expires_on`, each line is tagged with its renewal urgency as of today.
///
/// # Errors
///
/// Returns `CommandError::Quote` for an invalid domain, an extension or
/// period that is not offered, or no domains at checkout.
pub fn renew(
    ctx: &Context<'_>,
    domains: &[String],
    years: u32,
    expires_on: Option<NaiveDate>,
) -> Result<(), CommandError> {
    let renewals: Vec<DomainRenewal> = parse_domains(domains)?
        .into_iter()
        .map(|domain| DomainRenewal { domain, years })
        .collect();

    let summary = if ctx.check {
        ctx.catalog.checkout_domain_renewals(&renewals)?
    } else {
        ctx.catalog.quote_domain_renewals(&renewals)?
    };

    let urgency = expires_on.map_or_else(Vec::new, |expires_on| {
        let status = RenewalUrgency::for_expiration(expires_on, Utc::now().date_naive());
        renewals
            .iter()
            .map(|renewal| (renewal.domain.to_string(), status))
            .collect()
    });

    tracing::info!(
        domains = renewals.len(),
        years,
        total = %summary.total_due,
        "Quoted domain renewal"
    );

    ctx.print(
        &QuoteDocument::new("domain-renewal", ctx.catalog.currency, &summary)
            .with_urgency(urgency),
    )
}

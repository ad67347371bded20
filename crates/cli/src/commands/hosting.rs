//! Hosting order and renewal commands.

use hostpanel_core::quote::{HostingOrder, HostingRenewal};
use hostpanel_core::{AddOnId, DomainName, PlanId, QuoteError};
use rust_decimal::Decimal;

use super::{CommandError, Context};
use crate::output::QuoteDocument;

/// Build the order form from raw command-line values.
fn order_form(
    plan: Option<&str>,
    domain: Option<&str>,
    months: u32,
    add_ons: &[String],
) -> Result<HostingOrder, CommandError> {
    let plan = plan
        .map(|id| PlanId::parse(id).map_err(|e| CommandError::invalid_id("plan", id, e)))
        .transpose()?;
    let domain = domain
        .map(DomainName::parse)
        .transpose()
        .map_err(QuoteError::from)?;
    let add_ons = add_ons
        .iter()
        .map(|id| AddOnId::parse(id).map_err(|e| CommandError::invalid_id("add-on", id, e)))
        .collect::<Result<_, _>>()?;

    Ok(HostingOrder {
        plan,
        domain,
        months,
        add_ons,
    })
}

/// Quote, and unless `--quote-only` is set check out, a hosting order.
///
/// # Errors
///
/// Returns `CommandError::InvalidId` for a malformed plan or add-on id, and
/// `CommandError::Quote` for an unknown plan or add-on, a period
/// that is not offered, or a missing plan or domain at checkout.
pub fn order(
    ctx: &Context<'_>,
    plan: Option<&str>,
    domain: Option<&str>,
    months: u32,
    add_ons: &[String],
) -> Result<(), CommandError> {
    let form = order_form(plan, domain, months, add_ons)?;

    let summary = if ctx.check {
        ctx.catalog.checkout_hosting_order(&form)?
    } else {
        ctx.catalog.quote_hosting_order(&form)?
    };

    tracing::info!(
        plan = ?form.plan,
        months,
        add_ons = form.add_ons.len(),
        total = %summary.total_due,
        "Quoted hosting order"
    );

    ctx.print(&QuoteDocument::new(
        "hosting-order",
        ctx.catalog.currency,
        &summary,
    ))
}

/// Quote, and unless `--quote-only` is set check out, a hosting renewal.
///
/// # Errors
///
/// Returns `CommandError::Quote` for a period that is not offered or a
/// negative price.
pub fn renew(
    ctx: &Context<'_>,
    label: String,
    monthly_price: Decimal,
    months: u32,
) -> Result<(), CommandError> {
    let renewals = [HostingRenewal {
        label,
        monthly_price,
        months,
    }];

    let summary = if ctx.check {
        ctx.catalog.checkout_hosting_renewals(&renewals)?
    } else {
        ctx.catalog.quote_hosting_renewals(&renewals)?
    };

    tracing::info!(
        months,
        total = %summary.total_due,
        "Quoted hosting renewal"
    );

    ctx.print(&QuoteDocument::new(
        "hosting-renewal",
        ctx.catalog.currency,
        &summary,
    ))
}

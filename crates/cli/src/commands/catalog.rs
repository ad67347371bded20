//! Price list command.

use hostpanel_core::{Catalog, DiscountTier, Price};
use rust_decimal::Decimal;

use super::{CommandError, Context};
use crate::config::OutputFormat;
use crate::output;

/// Print the active catalog.
///
/// # Errors
///
/// Returns `CommandError::Render` if JSON serialization fails.
pub fn show(ctx: &Context<'_>) -> Result<(), CommandError> {
    let rendered = render(ctx.catalog, ctx.format)?;
    output::emit(&rendered);
    Ok(())
}

fn render(catalog: &Catalog, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(catalog),
        OutputFormat::Text => Ok(render_text(catalog)),
    }
}

fn tiers(schedule: &[DiscountTier]) -> String {
    if schedule.is_empty() {
        return "none".to_owned();
    }
    schedule
        .iter()
        .map(|tier| {
            format!(
                "{}+ -{}%",
                tier.minimum_quantity(),
                tier.discount_percent().normalize()
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn periods(values: &[u32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_text(catalog: &Catalog) -> String {
    let money = |amount: Decimal| Price::new(amount, catalog.currency).display();
    let mut lines = vec!["Domains (per year)".to_owned()];

    for tld in &catalog.tlds {
        lines.push(format!(
            "  {:<10}{:>14} register{:>14} renew",
            tld.tld,
            money(tld.registration_price),
            money(tld.renewal_price)
        ));
    }
    lines.push(format!(
        "  periods: {} years",
        periods(&catalog.periods.domain_years)
    ));

    lines.push("\nHosting plans (per month)".to_owned());
    for plan in &catalog.hosting_plans {
        let marker = if plan.popular { "  (most popular)" } else { "" };
        lines.push(format!(
            "  {:<10}{:<14}{:>14}{marker}",
            plan.id.as_str(),
            plan.name,
            money(plan.monthly_price)
        ));
    }
    lines.push(format!(
        "  periods: {} months",
        periods(&catalog.periods.hosting_months)
    ));

    lines.push("\nAdd-ons".to_owned());
    for add_on in &catalog.add_ons {
        lines.push(format!(
            "  {:<14}{:<26}{:>14}/{}",
            add_on.id.as_str(),
            add_on.name,
            money(add_on.unit_surcharge),
            add_on.unit
        ));
    }

    let schedules = &catalog.discounts;
    lines.push("\nDuration discounts".to_owned());
    for (flow, schedule) in [
        ("domain registration", &schedules.domain_registration),
        ("domain renewal", &schedules.domain_renewal),
        ("hosting order", &schedules.hosting_order),
        ("hosting renewal", &schedules.hosting_renewal),
    ] {
        lines.push(format!("  {flow:<21}{}", tiers(schedule)));
    }

    lines.push("\nPayment methods".to_owned());
    for method in &catalog.payment_methods {
        let status = if method.available { "" } else { "  (unavailable)" };
        lines.push(format!(
            "  {:<14}{:<18}{:>6}% fee{status}",
            method.id.as_str(),
            method.name,
            method.fee_percent.normalize()
        ));
    }
    lines.push(format!(
        "  minimum deposit: {}",
        money(catalog.funds_minimum)
    ));

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hostpanel_core::CurrencyCode;

    use super::*;

    #[test]
    fn test_text_lists_every_section() {
        let text = render(&Catalog::standard(), OutputFormat::Text).unwrap();

        assert!(text.contains(".com"));
        assert!(text.contains("$15.99 register"));
        assert!(text.contains("(most popular)"));
        assert!(text.contains("whois-privacy"));
        assert!(text.contains("12+ -10%, 24+ -20%"));
        assert!(text.contains("domain registration  none"));
        assert!(text.contains("hosting renewal      6+ -5%, 12+ -10%, 24+ -20%"));
        assert!(text.contains("flutterwave"));
        assert!(text.contains("minimum deposit: $5.00"));
    }

    #[test]
    fn test_json_round_trips() {
        let json = render(&Catalog::standard(), OutputFormat::Json).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Catalog::standard());
    }

    #[test]
    fn test_unavailable_method_is_marked() {
        let mut catalog = Catalog::standard();
        catalog.currency = CurrencyCode::EUR;
        catalog.payment_methods[0].available = false;
        let text = render_text(&catalog);
        assert!(text.contains("(unavailable)"));
        assert!(text.contains("€5.00"));
    }
}

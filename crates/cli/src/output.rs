//! Rendering quotes for the terminal.

use chrono::{DateTime, Utc};
use hostpanel_core::pricing::ChargeKind;
use hostpanel_core::quote::FundsQuote;
use hostpanel_core::{CurrencyCode, OrderSummary, Price, RenewalUrgency, round_money};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::OutputFormat;

/// A quote as emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct QuoteDocument<'a> {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub flow: &'static str,
    pub currency: CurrencyCode,
    pub summary: &'a OrderSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<&'a FundsQuote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urgency: Vec<(String, RenewalUrgency)>,
}

impl<'a> QuoteDocument<'a> {
    pub fn new(flow: &'static str, currency: CurrencyCode, summary: &'a OrderSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            flow,
            currency,
            summary,
            funds: None,
            urgency: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_funds(mut self, funds: &'a FundsQuote) -> Self {
        self.funds = Some(funds);
        self
    }

    #[must_use]
    pub fn with_urgency(mut self, urgency: Vec<(String, RenewalUrgency)>) -> Self {
        self.urgency = urgency;
        self
    }

    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let money = |amount: Decimal| Price::new(amount, self.currency).display();
        let mut lines = Vec::new();

        if self.summary.is_empty() {
            lines.push("(no items selected)".to_owned());
        }

        for item in &self.summary.line_items {
            let urgency = self
                .urgency
                .iter()
                .find(|(label, _)| label == &item.label)
                .map(|(_, urgency)| format!(" [{urgency}]"))
                .unwrap_or_default();
            lines.push(format!(
                "{} - {}{urgency}",
                item.label,
                item.unit.describe(item.quantity)
            ));

            for charge in &item.charges {
                let name = match &charge.kind {
                    ChargeKind::Base => "base".to_owned(),
                    ChargeKind::AddOn(id) => id.to_string(),
                };
                lines.push(format!("  {name:<24}{:>14}", money(charge.amount)));
            }
            // Charges are rounded one by one; gross, discount and subtotal
            // always add up.
            if item.charges.len() > 1 || item.is_discounted() {
                lines.push(format!(
                    "  {:<24}{:>14}",
                    "gross",
                    money(round_money(item.gross_amount))
                ));
            }
            if item.is_discounted() {
                let name = format!("discount ({}%)", item.discount_percent.normalize());
                lines.push(format!(
                    "  {name:<24}{:>14}",
                    format!("-{}", money(item.discount_amount))
                ));
            }
            lines.push(format!("  {:<24}{:>14}", "subtotal", money(item.net_amount)));
        }

        lines.push(format!("{:<26}{:>14}", "Total due", money(self.summary.total_due)));
        if self.summary.has_discounts() {
            lines.push(format!(
                "{:<26}{:>14}",
                "You save",
                money(self.summary.total_savings())
            ));
        }

        if let Some(funds) = self.funds {
            let charge = &funds.charge;
            if charge.fee_amount > Decimal::ZERO {
                lines.push(format!(
                    "{:<26}{:>14}",
                    format!("Fee ({}%)", charge.fee_percent.normalize()),
                    money(charge.fee_amount)
                ));
            }
            lines.push(format!(
                "{:<26}{:>14}",
                "Total charged",
                money(charge.total_charged)
            ));
        }

        lines.join("\n")
    }
}

/// Write rendered output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(rendered: &str) {
    println!("{rendered}");
}

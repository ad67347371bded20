//! Account funding command.

use hostpanel_core::PaymentMethodId;
use hostpanel_core::quote::FundsRequest;
use rust_decimal::Decimal;

use super::{CommandError, Context};
use crate::output::QuoteDocument;

/// Quote, and unless `--quote-only` is set check out, an account deposit.
///
/// # Errors
///
/// Returns `CommandError::InvalidId` for a malformed method id, and
/// `CommandError::Quote` for a negative amount, an unknown or unavailable
/// method, or at checkout an amount under the minimum or no method.
pub fn add(ctx: &Context<'_>, amount: Decimal, method: Option<&str>) -> Result<(), CommandError> {
    let payment_method = method
        .map(|id| {
            PaymentMethodId::parse(id)
                .map_err(|e| CommandError::invalid_id("payment method", id, e))
        })
        .transpose()?;
    let request = FundsRequest {
        amount,
        payment_method,
    };

    let quote = if ctx.check {
        ctx.catalog.checkout_funds(&request)?
    } else {
        ctx.catalog.quote_funds(&request)?
    };

    tracing::info!(
        amount = %quote.charge.requested_amount,
        fee = %quote.charge.fee_amount,
        charged = %quote.charge.total_charged,
        "Quoted account deposit"
    );

    ctx.print(
        &QuoteDocument::new("add-funds", ctx.catalog.currency, &quote.deposit).with_funds(&quote),
    )
}

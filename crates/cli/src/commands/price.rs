use std::path::Path;

use serde::Serialize;

use guesthouse_core::pricing::money::format_zar;
use guesthouse_core::pricing::{
    DateRangeResult, DeterministicQuoteRuntime, PricingTrace, QuoteRuntime,
};

use crate::commands::{read_draft, CommandResult};

#[derive(Debug, Serialize)]
struct PriceReport {
    nights: u32,
    subtotal: String,
    vat: String,
    discount: String,
    total: String,
    trace: PricingTrace,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<DateRangeResult>,
}

/// Prices a draft file locally; nothing is sent to the backend.
pub fn run(path: &Path) -> CommandResult {
    let draft = match read_draft("price", path) {
        Ok(draft) => draft,
        Err(result) => return result,
    };

    let evaluation = DeterministicQuoteRuntime::default().evaluate(draft.terms());
    let totals = evaluation.pricing.totals;

    let mut message = format!(
        "{} night(s), total {}",
        evaluation.pricing.nights,
        format_zar(totals.total)
    );
    if let Some(date_range) = evaluation.date_range.as_ref().filter(|result| !result.valid) {
        message.push_str(&format!(
            "; {} service date(s) fall outside the stay and would block saving",
            date_range.violations.len()
        ));
    }

    let report = PriceReport {
        nights: evaluation.pricing.nights,
        subtotal: format_zar(totals.subtotal),
        vat: format_zar(totals.vat),
        discount: format_zar(totals.discount),
        total: format_zar(totals.total),
        trace: evaluation.pricing.trace,
        date_range: evaluation.date_range,
    };

    CommandResult::success_with_data("price", message, report)
}

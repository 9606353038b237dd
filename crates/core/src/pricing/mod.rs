pub mod engine;
pub mod money;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::domain::quote::QuoteTerms;

pub use self::engine::{
    compute_totals, price_with_trace, resolve_discount, stay_nights, DeterministicPricingEngine,
    PricingEngine, PricingInput, PricingResult, PricingTrace, PricingTraceStep, CURRENCY,
    MIN_NIGHTS, VAT_RATE,
};
pub use self::validation::{
    all_dates_within_range, validate_service_dates, DateRangeInput, DateRangeResult,
    DateRangeValidator, DateRangeViolation, InclusiveDateRangeValidator,
};

/// Pricing plus service-date checks for one set of quote terms. The date
/// check is `None` until both stay dates are known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteEvaluation {
    pub pricing: PricingResult,
    pub date_range: Option<DateRangeResult>,
}

pub trait QuoteRuntime: Send + Sync {
    fn evaluate(&self, terms: &QuoteTerms) -> QuoteEvaluation;
}

pub struct DeterministicQuoteRuntime<P, V> {
    pricing_engine: P,
    date_validator: V,
}

impl<P, V> DeterministicQuoteRuntime<P, V> {
    pub fn new(pricing_engine: P, date_validator: V) -> Self {
        Self { pricing_engine, date_validator }
    }
}

impl Default
    for DeterministicQuoteRuntime<DeterministicPricingEngine, InclusiveDateRangeValidator>
{
    fn default() -> Self {
        Self::new(DeterministicPricingEngine, InclusiveDateRangeValidator)
    }
}

impl<P, V> QuoteRuntime for DeterministicQuoteRuntime<P, V>
where
    P: PricingEngine,
    V: DateRangeValidator,
{
    fn evaluate(&self, terms: &QuoteTerms) -> QuoteEvaluation {
        let pricing = self.pricing_engine.price(&terms.pricing_input());
        let date_range = match (terms.check_in_date, terms.check_out_date) {
            (Some(check_in), Some(check_out)) => {
                Some(self.date_validator.validate(&DateRangeInput {
                    services: &terms.services,
                    check_in,
                    check_out,
                }))
            }
            _ => None,
        };

        QuoteEvaluation { pricing, date_range }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{
        DateRangeInput, DateRangeResult, DateRangeValidator, DeterministicPricingEngine,
        DeterministicQuoteRuntime, QuoteRuntime,
    };
    use crate::domain::quote::{QuoteTerms, UnitCosts};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date")
    }

    fn terms() -> QuoteTerms {
        QuoteTerms {
            check_in_date: Some(date(1)),
            check_out_date: Some(date(4)),
            number_of_beds: 2,
            number_of_guests: 2,
            unit_costs: UnitCosts {
                bed: Decimal::new(500, 0),
                breakfast: Decimal::new(50, 0),
                ..UnitCosts::default()
            },
            ..QuoteTerms::default()
        }
    }

    #[test]
    fn runtime_returns_pricing_and_date_checks() {
        let mut terms = terms();
        terms.services.breakfast.extend([date(2), date(3), date(7)]);

        let evaluation = DeterministicQuoteRuntime::default().evaluate(&terms);

        assert_eq!(evaluation.pricing.nights, 3);
        assert_eq!(evaluation.pricing.totals.subtotal, Decimal::new(3300, 0));
        let date_range = evaluation.date_range.expect("both stay dates are set");
        assert!(!date_range.valid);
        assert_eq!(date_range.violations.len(), 1);
    }

    #[test]
    fn date_check_is_skipped_until_stay_is_known() {
        let terms = QuoteTerms { check_out_date: None, ..terms() };
        let evaluation = DeterministicQuoteRuntime::default().evaluate(&terms);

        assert!(evaluation.date_range.is_none());
        assert_eq!(evaluation.pricing.nights, 1);
    }

    #[test]
    fn runtime_supports_explicit_validator_interfaces() {
        struct RejectAll;

        impl DateRangeValidator for RejectAll {
            fn validate(&self, _input: &DateRangeInput<'_>) -> DateRangeResult {
                DateRangeResult { valid: false, violations: Vec::new() }
            }
        }

        let runtime = DeterministicQuoteRuntime::new(DeterministicPricingEngine, RejectAll);
        let evaluation = runtime.evaluate(&terms());

        assert!(evaluation.date_range.is_some_and(|result| !result.valid));
    }
}

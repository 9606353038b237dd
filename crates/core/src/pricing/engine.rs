use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{QuoteTotals, ServiceSchedule, UnitCosts};

pub const CURRENCY: &str = "ZAR";

/// Fixed 15% South African VAT.
pub const VAT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Same-day, reversed, or incomplete stays are billed as one night.
pub const MIN_NIGHTS: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricingInput<'a> {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub number_of_beds: u32,
    pub number_of_guests: u32,
    pub unit_costs: &'a UnitCosts,
    pub services: &'a ServiceSchedule,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTrace {
    pub currency: String,
    pub steps: Vec<PricingTraceStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub nights: u32,
    pub totals: QuoteTotals,
    pub trace: PricingTrace,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, input: &PricingInput<'_>) -> PricingResult;
}

#[derive(Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, input: &PricingInput<'_>) -> PricingResult {
        price_with_trace(input)
    }
}

pub fn stay_nights(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u32 {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return MIN_NIGHTS;
    };

    let days = check_out.signed_duration_since(check_in).num_days();
    u32::try_from(days).unwrap_or(0).max(MIN_NIGHTS)
}

/// An explicit amount wins over a percentage; both default to zero.
pub fn resolve_discount(subtotal: Decimal, percentage: Decimal, amount: Decimal) -> Decimal {
    if amount > Decimal::ZERO {
        return amount;
    }

    subtotal.saturating_mul(percentage) / Decimal::ONE_HUNDRED
}

pub fn compute_totals(input: &PricingInput<'_>) -> QuoteTotals {
    price_with_trace(input).totals
}

pub fn price_with_trace(input: &PricingInput<'_>) -> PricingResult {
    let nights = stay_nights(input.check_in, input.check_out);
    let guests = Decimal::from(input.number_of_guests);
    let mut steps = Vec::with_capacity(9);

    let bed_total = Decimal::from(input.number_of_beds)
        .saturating_mul(Decimal::from(nights))
        .saturating_mul(input.unit_costs.bed);
    steps.push(step(
        "beds",
        format!(
            "{} beds x {nights} nights x {}",
            input.number_of_beds, input.unit_costs.bed
        ),
        bed_total,
    ));

    let mut subtotal = bed_total;
    for (category, dates) in input.services.iter() {
        let unit_cost = input.unit_costs.for_service(category);
        let category_total =
            Decimal::from(dates.len()).saturating_mul(guests).saturating_mul(unit_cost);
        steps.push(step(
            category.as_str(),
            format!("{} dates x {} guests x {unit_cost}", dates.len(), input.number_of_guests),
            category_total,
        ));
        subtotal = subtotal.saturating_add(category_total);
    }
    steps.push(step("subtotal", "beds + services".to_string(), subtotal));

    let vat = subtotal.saturating_mul(VAT_RATE);
    steps.push(step("vat", format!("subtotal x {VAT_RATE}"), vat));

    let discount =
        resolve_discount(subtotal, input.discount_percentage, input.discount_amount);
    let discount_detail = if input.discount_amount > Decimal::ZERO {
        format!("fixed amount {}", input.discount_amount)
    } else {
        format!("{}% of subtotal", input.discount_percentage)
    };
    steps.push(step("discount", discount_detail, discount));

    let total = subtotal.saturating_add(vat).saturating_sub(discount);
    steps.push(step("total", "subtotal + vat - discount".to_string(), total));

    PricingResult {
        nights,
        totals: QuoteTotals { subtotal, vat, discount, total },
        trace: PricingTrace { currency: CURRENCY.to_string(), steps },
    }
}

fn step(stage: &str, detail: String, amount: Decimal) -> PricingTraceStep {
    PricingTraceStep { stage: stage.to_string(), detail, amount }
}

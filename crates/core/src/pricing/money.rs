//! Money helpers for ZAR display and lenient form input.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders `R1234.50`; negative totals keep the sign after the symbol (`R-850.00`).
pub fn format_zar(amount: Decimal) -> String {
    format!("R{:.2}", round_money(amount))
}

/// Parses a money or percentage value, keeping blank and malformed input
/// distinguishable from an explicit zero.
pub fn parse_optional_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)).ok()
}

/// Parses a typed money or percentage value. Blank or malformed input is zero.
pub fn parse_amount(raw: &str) -> Decimal {
    parse_optional_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Parses a typed count. Fractions truncate, negatives and garbage become zero.
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }

    let amount = parse_amount(trimmed).trunc();
    if amount <= Decimal::ZERO {
        return 0;
    }
    amount.to_u32().unwrap_or(u32::MAX)
}

/// Accepts `YYYY-MM-DD` or an ISO timestamp whose date part comes first.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split_once('T').map(|(date, _)| date).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

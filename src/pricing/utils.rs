//! Utility functions for common operations

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Median of a set of values
/// Odd count: middle value. Even count: mean of the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean, None for an empty input
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round to `decimals` places, halves away from zero
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Signed percentage difference of `value` against `reference`, rounded to
/// `decimals` places with halves away from zero.
/// Computed in decimal so exact halves such as 7.05 are not lost to binary
/// floating point; falls back to f64 only when a value overflows Decimal.
pub fn percent_diff(value: f64, reference: f64, decimals: u32) -> f64 {
    let exact = Decimal::from_f64(value)
        .zip(Decimal::from_f64(reference))
        .filter(|(_, r)| !r.is_zero())
        .and_then(|(v, r)| {
            v.checked_sub(r)?
                .checked_mul(Decimal::ONE_HUNDRED)?
                .checked_div(r)
        })
        .map(|pct| pct.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_f64());

    exact.unwrap_or_else(|| round_half_away((value - reference) / reference * 100.0, decimals))
}

/// Parse a money string such as "$1,180,000" or "1180000.00"
pub fn parse_money(raw: &str) -> Option<f64> {
    let clean: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    if clean.is_empty() {
        return None;
    }

    clean.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a floor area such as "2,700", "2700 sqft" or "2,700 sq ft"
/// Zero or negative areas are treated as unknown.
pub fn parse_square_feet(raw: &str) -> Option<u32> {
    let lower = raw.trim().to_lowercase();
    let number = lower
        .trim_end_matches("sq ft")
        .trim_end_matches("sqft")
        .trim_end_matches("sf")
        .replace(',', "");

    number.trim().parse::<f64>().ok().and_then(square_feet_from_f64)
}

/// Floor area from a raw number, rounded to whole feet; non-positive is unknown
pub fn square_feet_from_f64(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 || value > f64::from(u32::MAX) {
        return None;
    }

    Some(value.round() as u32)
}

/// Parse days on market, rejecting negatives
pub fn parse_days_on_market(raw: &str) -> Option<u32> {
    raw.trim().replace(',', "").parse::<u32>().ok()
}

/// Days on market from a raw number; must be a non-negative whole number
pub fn days_on_market_from_f64(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }

    Some(value as u32)
}

/// Parse a sale date in any of the export formats we see
/// (2024-03-15, 03/15/2024, 15-Mar-2024, 2024-03-15T00:00:00Z)
pub fn parse_sold_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    ["%Y-%m-%d", "%m/%d/%Y", "%d-%b-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

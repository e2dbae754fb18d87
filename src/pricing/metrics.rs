//! Metrics engine - turns a subject and its comparable sales into PricingMetrics
//! Pure functions, no I/O

use crate::config::DEFAULT_PRICE_DIFF_DECIMALS;
use crate::pricing::types::{ComparableSale, PricingError, PricingMetrics, SubjectProperty};
use crate::pricing::utils::{mean, median, percent_diff};
use tracing::debug;

/// Check that the subject carries a usable list price
pub fn validate_subject(subject: &SubjectProperty) -> Result<f64, PricingError> {
    match subject.list_price {
        None => Err(PricingError::InvalidInput(
            "subject listPrice is required".to_string(),
        )),
        Some(price) if !price.is_finite() || price <= 0.0 => Err(PricingError::InvalidInput(
            format!("subject listPrice must be positive, got {}", price),
        )),
        Some(price) => Ok(price),
    }
}

/// Compute market metrics with the default price_diff_pct precision
pub fn compute_metrics(
    subject: &SubjectProperty,
    comparables: &[ComparableSale],
) -> Result<PricingMetrics, PricingError> {
    compute_metrics_with_precision(subject, comparables, DEFAULT_PRICE_DIFF_DECIMALS)
}

/// Compute market metrics, rounding price_diff_pct to `decimals` places
pub fn compute_metrics_with_precision(
    subject: &SubjectProperty,
    comparables: &[ComparableSale],
    decimals: u32,
) -> Result<PricingMetrics, PricingError> {
    let list_price = validate_subject(subject)?;

    let usable: Vec<&ComparableSale> = comparables
        .iter()
        .filter(|c| c.usable_price().is_some())
        .collect();

    if usable.len() < comparables.len() {
        debug!(
            "Dropped {} of {} comparables without a usable sold price",
            comparables.len() - usable.len(),
            comparables.len()
        );
    }

    if usable.is_empty() {
        debug!("No usable comparables for {}", subject.address);
        return Ok(PricingMetrics::insufficient());
    }

    let prices: Vec<f64> = usable.iter().filter_map(|c| c.usable_price()).collect();

    // Non-empty, so the median exists and is positive
    let median_sold_price = median(&prices);
    let avg_sold_price = mean(prices.iter().copied());

    let avg_price_per_sqft = mean(usable.iter().filter_map(|c| c.price_per_sqft()));

    let subject_price_per_sqft = match subject.square_feet {
        Some(sqft) if sqft > 0 => Some(list_price / f64::from(sqft)),
        _ => None,
    };

    let avg_days_on_market = mean(
        usable
            .iter()
            .filter_map(|c| c.days_on_market)
            .map(f64::from),
    );

    let price_diff_pct = median_sold_price.map(|m| percent_diff(list_price, m, decimals));

    debug!(
        "Computed metrics for {}: {} comps, median {:?}, diff {:?}%",
        subject.address,
        usable.len(),
        median_sold_price,
        price_diff_pct
    );

    Ok(PricingMetrics {
        median_sold_price,
        avg_sold_price,
        avg_price_per_sqft,
        subject_price_per_sqft,
        avg_days_on_market,
        comp_count: usable.len(),
        price_diff_pct,
    })
}

//! Comparable-sales pricing: metrics engine, positioning classifier and their HTTP/CLI callers

pub mod api;
pub mod config;
pub mod error;
pub mod pricing;

use config::PricingConfig;
use pricing::{
    metrics::compute_metrics_with_precision, positioning::classify, ComparableSale, PricingError,
    PricingSummary, SubjectProperty,
};

/// Run the metrics engine and the positioning classifier for one subject
pub fn analyze(
    subject: &SubjectProperty,
    comparables: &[ComparableSale],
    config: &PricingConfig,
) -> Result<PricingSummary, PricingError> {
    let metrics = compute_metrics_with_precision(subject, comparables, config.price_diff_decimals)?;
    let positioning = classify(&metrics, config);

    Ok(PricingSummary {
        metrics,
        positioning,
    })
}

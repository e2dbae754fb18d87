//! Positioning classifier - maps metrics onto a qualitative label

use crate::config::PricingConfig;
use crate::pricing::types::{PositioningLabel, PricingMetrics};

/// Classify the subject's price against the comparables median
/// Diffs of exactly +/- band are aligned; only strictly larger deviations leave the band.
pub fn classify(metrics: &PricingMetrics, config: &PricingConfig) -> PositioningLabel {
    if metrics.is_insufficient() {
        return PositioningLabel::InsufficientData;
    }

    let band = config.positioning_band_pct;
    match metrics.price_diff_pct {
        None => PositioningLabel::InsufficientData,
        Some(diff) if diff > band => PositioningLabel::AboveRange,
        Some(diff) if diff < -band => PositioningLabel::BelowRange,
        Some(_) => PositioningLabel::Aligned,
    }
}

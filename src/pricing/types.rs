//! Core data types for the pricing pipeline
//! Pure data structures, serialized in the camelCase shape callers exchange

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the pricing engine
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The property under analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProperty {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    pub list_price: Option<f64>,
    pub square_feet: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
}

impl SubjectProperty {
    /// Subject with only a list price and optional floor area
    pub fn priced(list_price: f64, square_feet: Option<u32>) -> Self {
        SubjectProperty {
            list_price: Some(list_price),
            square_feet,
            ..Default::default()
        }
    }

    /// Range checks on the descriptive attributes
    /// The engine only needs list_price; callers run this before accepting a request.
    pub fn validate_attributes(&self) -> Result<(), PricingError> {
        if let Some(baths) = self.bathrooms {
            if !baths.is_finite() || baths < 0.0 {
                return Err(PricingError::InvalidInput(format!(
                    "subject bathrooms must be non-negative, got {}",
                    baths
                )));
            }
        }
        Ok(())
    }
}

/// One historical sale used as a market reference
/// Provider payloads are read leniently: a malformed field becomes None
/// instead of rejecting the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableSale {
    #[serde(default, deserialize_with = "lenient::sold_price")]
    pub sold_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::square_feet")]
    pub square_feet: Option<u32>,
    #[serde(default, deserialize_with = "lenient::days_on_market")]
    pub days_on_market: Option<u32>,
    #[serde(default, deserialize_with = "lenient::sold_date")]
    pub sold_date: Option<NaiveDate>,
}

impl ComparableSale {
    pub fn new(sold_price: f64, square_feet: Option<u32>) -> Self {
        ComparableSale {
            sold_price: Some(sold_price),
            square_feet,
            ..Default::default()
        }
    }

    /// Sold price if it can take part in aggregation (positive and finite)
    pub fn usable_price(&self) -> Option<f64> {
        self.sold_price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Price per square foot, when both price and a positive area are known
    pub fn price_per_sqft(&self) -> Option<f64> {
        match (self.usable_price(), self.square_feet) {
            (Some(price), Some(sqft)) if sqft > 0 => Some(price / f64::from(sqft)),
            _ => None,
        }
    }
}

/// Aggregate market metrics for one subject against its comparables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingMetrics {
    pub median_sold_price: Option<f64>,
    pub avg_sold_price: Option<f64>,
    pub avg_price_per_sqft: Option<f64>,
    pub subject_price_per_sqft: Option<f64>,
    pub avg_days_on_market: Option<f64>,
    pub comp_count: usize,
    pub price_diff_pct: Option<f64>,
}

impl PricingMetrics {
    /// Explicit "no usable comparables" result - every derived field is null
    pub fn insufficient() -> Self {
        PricingMetrics::default()
    }

    pub fn is_insufficient(&self) -> bool {
        self.comp_count == 0
    }
}

/// Qualitative position of the subject's price against the comparables median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositioningLabel {
    Aligned,
    AboveRange,
    BelowRange,
    InsufficientData,
}

impl std::fmt::Display for PositioningLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositioningLabel::Aligned => write!(f, "aligned"),
            PositioningLabel::AboveRange => write!(f, "above-range"),
            PositioningLabel::BelowRange => write!(f, "below-range"),
            PositioningLabel::InsufficientData => write!(f, "insufficient-data"),
        }
    }
}

/// Metrics plus positioning, the shape handed to prompt assembly and HTTP responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    #[serde(flatten)]
    pub metrics: PricingMetrics,
    pub positioning: PositioningLabel,
}

/// Comps import statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseStats {
    pub parsed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for ParseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parsed: {}, skipped: {}, errors: {}",
            self.parsed, self.skipped, self.errors
        )
    }
}

/// Deserializers that accept numbers or text and normalise them
mod lenient {
    use crate::pricing::utils::{
        days_on_market_from_f64, parse_days_on_market, parse_money, parse_sold_date,
        parse_square_feet, square_feet_from_f64,
    };
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(deserializer)
    }

    pub fn sold_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_money(&s),
            _ => None,
        })
    }

    pub fn square_feet<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::Number(n)) => n.as_f64().and_then(square_feet_from_f64),
            Some(Value::String(s)) => parse_square_feet(&s),
            _ => None,
        })
    }

    pub fn days_on_market<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::Number(n)) => n.as_f64().and_then(days_on_market_from_f64),
            Some(Value::String(s)) => parse_days_on_market(&s),
            _ => None,
        })
    }

    pub fn sold_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::String(s)) => parse_sold_date(&s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_price_rejects_non_positive() {
        assert_eq!(ComparableSale::new(-1.0, None).usable_price(), None);
        assert_eq!(ComparableSale::new(0.0, None).usable_price(), None);
        assert_eq!(ComparableSale::new(f64::NAN, None).usable_price(), None);
        assert_eq!(ComparableSale::default().usable_price(), None);
        assert_eq!(
            ComparableSale::new(500_000.0, None).usable_price(),
            Some(500_000.0)
        );
    }

    #[test]
    fn test_price_per_sqft_needs_positive_area() {
        assert_eq!(ComparableSale::new(500_000.0, Some(0)).price_per_sqft(), None);
        assert_eq!(ComparableSale::new(500_000.0, None).price_per_sqft(), None);
        assert_eq!(
            ComparableSale::new(500_000.0, Some(2000)).price_per_sqft(),
            Some(250.0)
        );
    }

    #[test]
    fn test_summary_serializes_explicit_nulls() {
        let summary = PricingSummary {
            metrics: PricingMetrics::insufficient(),
            positioning: PositioningLabel::InsufficientData,
        };

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["compCount"], 0);
        assert!(json["medianSoldPrice"].is_null());
        assert!(json["avgSoldPrice"].is_null());
        assert!(json["avgPricePerSqft"].is_null());
        assert!(json["subjectPricePerSqft"].is_null());
        assert!(json["avgDaysOnMarket"].is_null());
        assert!(json["priceDiffPct"].is_null());
        assert_eq!(json["positioning"], "insufficient-data");
    }

    #[test]
    fn test_comparable_deserializes_camel_case() {
        let comp: ComparableSale = serde_json::from_str(
            r#"{"soldPrice": 1180000, "squareFeet": 2700, "daysOnMarket": 12, "soldDate": "2024-03-01"}"#,
        )
        .unwrap();

        assert_eq!(comp.sold_price, Some(1_180_000.0));
        assert_eq!(comp.square_feet, Some(2700));
        assert_eq!(comp.days_on_market, Some(12));
        assert_eq!(comp.sold_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_comparable_malformed_fields_become_unknown() {
        let comp: ComparableSale = serde_json::from_str(
            r#"{"soldPrice": -1, "squareFeet": -5, "daysOnMarket": -2, "soldDate": "last spring"}"#,
        )
        .unwrap();

        assert_eq!(comp.sold_price, Some(-1.0));
        assert_eq!(comp.usable_price(), None);
        assert_eq!(comp.square_feet, None);
        assert_eq!(comp.days_on_market, None);
        assert_eq!(comp.sold_date, None);
    }

    #[test]
    fn test_comparable_normalises_provider_formats() {
        let comp: ComparableSale = serde_json::from_str(
            r#"{"soldPrice": "$1,150,000", "squareFeet": 2700.0, "daysOnMarket": "21", "soldDate": "03/15/2024"}"#,
        )
        .unwrap();

        assert_eq!(comp.sold_price, Some(1_150_000.0));
        assert_eq!(comp.square_feet, Some(2700));
        assert_eq!(comp.days_on_market, Some(21));
        assert_eq!(comp.sold_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_comparable_missing_and_null_fields() {
        let comp: ComparableSale =
            serde_json::from_str(r#"{"soldPrice": 900000, "squareFeet": null, "extra": true}"#)
                .unwrap();

        assert_eq!(comp, ComparableSale::new(900_000.0, None));
    }

    #[test]
    fn test_validate_attributes_rejects_negative_bathrooms() {
        let mut subject = SubjectProperty::priced(800_000.0, None);
        subject.bathrooms = Some(-1.5);
        assert!(matches!(
            subject.validate_attributes(),
            Err(PricingError::InvalidInput(_))
        ));

        subject.bathrooms = Some(2.5);
        assert!(subject.validate_attributes().is_ok());

        subject.bathrooms = None;
        assert!(subject.validate_attributes().is_ok());
    }

    #[test]
    fn test_label_display_matches_serde() {
        for label in [
            PositioningLabel::Aligned,
            PositioningLabel::AboveRange,
            PositioningLabel::BelowRange,
            PositioningLabel::InsufficientData,
        ] {
            let json = serde_json::to_value(label).unwrap();
            assert_eq!(json, label.to_string());
        }
    }
}

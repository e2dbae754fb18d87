//! Parse functions - transform exported comps CSV into ComparableSale structs

use crate::pricing::types::{ComparableSale, ParseStats};
use crate::pricing::utils::{
    parse_days_on_market, parse_money, parse_sold_date, parse_square_feet,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Comps CSV row structure
/// Everything is read as text; exports carry "$" signs, thousands separators and unit suffixes.
#[derive(Debug, Deserialize)]
struct CompsCsvRow {
    #[serde(rename = "Sold Price", default)]
    sold_price: Option<String>,

    #[serde(rename = "Square Feet", default)]
    square_feet: Option<String>,

    #[serde(rename = "Days On Market", default)]
    days_on_market: Option<String>,

    #[serde(rename = "Sold Date", default)]
    sold_date: Option<String>,
}

/// Parse a comps CSV file from disk
pub fn parse_comps_file(path: &Path) -> Result<(Vec<ComparableSale>, ParseStats)> {
    info!("Parsing comps CSV from {:?}", path);
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    parse_comps_csv(file)
}

/// Parse comps CSV content into ComparableSale structs
/// Rows without a usable sold price are kept (the engine filters them) but counted as skipped.
pub fn parse_comps_csv<R: Read>(source: R) -> Result<(Vec<ComparableSale>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut comps = Vec::new();
    let mut stats = ParseStats::default();

    for (idx, result) in reader.deserialize::<CompsCsvRow>().enumerate() {
        match result {
            Ok(row) => {
                let comp = parse_comps_row(row);
                if comp.usable_price().is_some() {
                    stats.parsed += 1;
                } else {
                    stats.skipped += 1;
                }
                comps.push(comp);
            }
            Err(e) => {
                stats.errors += 1;
                if stats.errors <= 10 {
                    // Only log first 10 errors
                    warn!("Failed to deserialize row {}: {}", idx, e);
                }
            }
        }
    }

    info!("Parsed comps CSV ({})", stats);

    Ok((comps, stats))
}

fn parse_comps_row(row: CompsCsvRow) -> ComparableSale {
    ComparableSale {
        sold_price: row.sold_price.as_deref().and_then(parse_money),
        square_feet: row.square_feet.as_deref().and_then(parse_square_feet),
        days_on_market: row.days_on_market.as_deref().and_then(parse_days_on_market),
        sold_date: row.sold_date.as_deref().and_then(parse_sold_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_parse_comps_row() {
        let row = CompsCsvRow {
            sold_price: Some("$1,180,000".to_string()),
            square_feet: Some("2,700 sqft".to_string()),
            days_on_market: Some("21".to_string()),
            sold_date: Some("03/15/2024".to_string()),
        };

        let comp = parse_comps_row(row);

        assert_eq!(comp.sold_price, Some(1_180_000.0));
        assert_eq!(comp.square_feet, Some(2700));
        assert_eq!(comp.days_on_market, Some(21));
        assert_eq!(comp.sold_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_parse_comps_csv() {
        let data = "\
Address,Sold Price,Square Feet,Days On Market,Sold Date
12 Oak St,\"$1,180,000\",2700,14,2024-02-01
9 Elm St,\"$1,150,000\",\"2,650\",,2024-01-20
4 Pine Ave,N/A,2900,30,2024-01-05
";

        let (comps, stats) = parse_comps_csv(data.as_bytes()).unwrap();

        assert_eq!(comps.len(), 3);
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(comps[1].square_feet, Some(2650));
        assert_eq!(comps[1].days_on_market, None);
        assert_eq!(comps[2].sold_price, None);
    }

    #[test]
    fn test_parse_comps_csv_missing_optional_columns() {
        let data = "Sold Price\n950000\n1000000\n";

        let (comps, stats) = parse_comps_csv(data.as_bytes()).unwrap();

        assert_eq!(stats.parsed, 2);
        assert_eq!(comps[0], ComparableSale::new(950_000.0, None));
    }

    #[test]
    fn test_parse_comps_csv_empty_input() {
        let (comps, stats) = parse_comps_csv("".as_bytes()).unwrap();

        assert!(comps.is_empty());
        assert_eq!(stats, ParseStats::default());
    }

    #[test]
    fn test_parse_comps_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sold Price,Square Feet").unwrap();
        writeln!(file, "\"$1,220,000\",2900").unwrap();

        let (comps, stats) = parse_comps_file(file.path()).unwrap();

        assert_eq!(stats.parsed, 1);
        assert_eq!(comps[0], ComparableSale::new(1_220_000.0, Some(2900)));
    }

    #[test]
    fn test_parse_comps_file_missing() {
        let result = parse_comps_file(Path::new("/nonexistent/comps.csv"));
        assert!(result.is_err());
    }
}

//! Comps report - analyze a subject against comparable sales exported as CSV
//!
//! Usage: comps-report <comps.csv> <list_price> [square_feet]

use anyhow::{Context, Result};
use realtor_pricing::analyze;
use realtor_pricing::config::Config;
use realtor_pricing::pricing::{parse, utils::parse_money, utils::parse_square_feet, SubjectProperty};
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};

fn main() {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    if let Err(e) = run() {
        error!("✗ comps report failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    let args = Args::parse(env::args().skip(1).collect())?;

    info!("Step 1/3: Parsing comps from {:?}...", args.comps_path);
    let (comps, stats) = parse::parse_comps_file(&args.comps_path)?;
    if stats.errors > 0 {
        warn!("{} rows could not be read", stats.errors);
    }
    info!("✓ Parsed {} comps ({})", comps.len(), stats);

    info!("Step 2/3: Computing metrics...");
    let summary = analyze(&args.subject, &comps, &config.pricing)?;
    info!(
        "✓ {} comps used, positioning {}",
        summary.metrics.comp_count, summary.positioning
    );

    info!("Step 3/3: Writing report...");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Command line arguments
#[derive(Debug)]
struct Args {
    comps_path: PathBuf,
    subject: SubjectProperty,
}

impl Args {
    /// Parse arguments following the program name
    fn parse(args: Vec<String>) -> Result<Self> {
        if args.len() < 2 {
            anyhow::bail!("usage: comps-report <comps.csv> <list_price> [square_feet]");
        }

        let list_price = parse_money(&args[1])
            .with_context(|| format!("list price '{}' is not a number", args[1]))?;

        let square_feet = match args.get(2) {
            Some(raw) => Some(
                parse_square_feet(raw)
                    .with_context(|| format!("square feet '{}' is not a positive number", raw))?,
            ),
            None => None,
        };

        Ok(Args {
            comps_path: PathBuf::from(&args[0]),
            subject: SubjectProperty::priced(list_price, square_feet),
        })
    }
}

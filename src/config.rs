//! Configuration loaded from environment variables

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Default half-width of the "aligned" band, in percent
pub const DEFAULT_POSITIONING_BAND_PCT: f64 = 7.0;
/// Default precision of price_diff_pct
pub const DEFAULT_PRICE_DIFF_DECIMALS: u32 = 1;
/// Upper bound on price_diff_pct precision
pub const MAX_PRICE_DIFF_DECIMALS: u32 = 6;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Tunables of the pricing engine, passed explicitly into each analysis
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Diffs within +/- this percentage are classified as aligned (POSITIONING_BAND_PCT)
    pub positioning_band_pct: f64,
    /// Decimal places price_diff_pct is rounded to (PRICE_DIFF_DECIMALS)
    pub price_diff_decimals: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            positioning_band_pct: DEFAULT_POSITIONING_BAND_PCT,
            price_diff_decimals: DEFAULT_PRICE_DIFF_DECIMALS,
        }
    }
}

impl PricingConfig {
    pub fn with_band(positioning_band_pct: f64) -> Self {
        PricingConfig {
            positioning_band_pct,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.positioning_band_pct.is_finite() || self.positioning_band_pct < 0.0 {
            anyhow::bail!(
                "POSITIONING_BAND_PCT must be a non-negative number, got {}",
                self.positioning_band_pct
            );
        }
        if self.price_diff_decimals > MAX_PRICE_DIFF_DECIMALS {
            anyhow::bail!(
                "PRICE_DIFF_DECIMALS must be at most {}, got {}",
                MAX_PRICE_DIFF_DECIMALS,
                self.price_diff_decimals
            );
        }
        Ok(())
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub pricing: PricingConfig,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a valid socket address")?;

        let positioning_band_pct = match lookup("POSITIONING_BAND_PCT") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .context("POSITIONING_BAND_PCT must be a valid number")?,
            None => DEFAULT_POSITIONING_BAND_PCT,
        };

        let price_diff_decimals = match lookup("PRICE_DIFF_DECIMALS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("PRICE_DIFF_DECIMALS must be a non-negative integer")?,
            None => DEFAULT_PRICE_DIFF_DECIMALS,
        };

        let pricing = PricingConfig {
            positioning_band_pct,
            price_diff_decimals,
        };
        pricing.validate()?;

        Ok(Config {
            bind_addr,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            pricing,
        })
    }
}

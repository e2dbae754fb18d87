//! Pricing module - pure pipeline from comparable sales to a positioning summary

pub mod metrics;
pub mod parse;
pub mod positioning;
pub mod types;
pub mod utils;

pub use types::*;

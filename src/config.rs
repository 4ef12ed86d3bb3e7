//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::domain::{QuantityRange, RangeError, DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY};
use crate::refresher::RefreshSettings;

/// How new quantities reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UpdateMode {
    /// One `update_one` round trip per product, random values drawn locally.
    PerDocument,
    /// A single `update_many` pipeline, random values drawn by the server.
    Bulk,
}

/// Overwrites every product's stock quantity with a random value and reports
/// the collection's stock before and after.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017", hide_env_values = true)]
    pub uri: String,

    #[arg(long, env = "MONGODB_DBNAME", default_value = "product_service")]
    pub database: String,

    #[arg(long, env = "MONGODB_COLLECTION", default_value = "products")]
    pub collection: String,

    #[arg(long, default_value_t = DEFAULT_MIN_QUANTITY)]
    pub min_quantity: u32,

    #[arg(long, default_value_t = DEFAULT_MAX_QUANTITY)]
    pub max_quantity: u32,

    /// Number of products listed in each snapshot.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub sample_limit: u32,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = UpdateMode::PerDocument)]
    pub mode: UpdateMode,
}

impl Config {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn settings(&self) -> Result<RefreshSettings, RangeError> {
        Ok(RefreshSettings {
            range: QuantityRange::new(self.min_quantity, self.max_quantity)?,
            sample_limit: self.sample_limit,
            mode: self.mode,
        })
    }
}

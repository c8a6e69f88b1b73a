// Layered configuration: built-in defaults, then an optional config.toml,
// then APP_* environment variables (nested keys use "__", e.g.
// APP_SEARCH__FUZZY_THRESHOLD=0.25).

use anyhow::Result;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::emi::DownPaymentBand;
use crate::fuzzy::{FuzzyConfig, DEFAULT_THRESHOLD};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    pub catalog_path: String,
    pub search: SearchSettings,
    pub loan: LoanSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchSettings {
    pub fuzzy_threshold: f64,
    pub cache_size: usize, // Memoised search results kept in the LRU
}

// Defaults the finance widgets start from
#[derive(Debug, Deserialize, Clone)]
pub struct LoanSettings {
    pub annual_rate_percent: f64,
    pub term_months: i64,
    pub down_payment_min_fraction: f64,
    pub down_payment_max_fraction: f64,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::with_defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_CATALOG_PATH)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    // Built-in defaults only, no file or environment
    pub fn defaults() -> Result<Self> {
        let settings = Self::with_defaults()?.build()?.try_deserialize()?;
        Ok(settings)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("catalog_path", "data/inventory.json")?
            .set_default("search.fuzzy_threshold", DEFAULT_THRESHOLD)?
            .set_default("search.cache_size", 128_i64)?
            .set_default("loan.annual_rate_percent", 9.5)?
            .set_default("loan.term_months", 60_i64)?
            .set_default("loan.down_payment_min_fraction", 0.10)?
            .set_default("loan.down_payment_max_fraction", 0.50)?;
        Ok(builder)
    }

    pub fn fuzzy_config(&self) -> FuzzyConfig {
        FuzzyConfig {
            threshold: self.search.fuzzy_threshold,
        }
    }

    pub fn down_payment_band(&self) -> DownPaymentBand {
        DownPaymentBand {
            min_fraction: self.loan.down_payment_min_fraction,
            max_fraction: self.loan.down_payment_max_fraction,
        }
    }
}

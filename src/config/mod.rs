//! Configuration module for the trade journal.
//!
//! Settings are loaded from environment variables (a `.env` file is honored
//! by the binary), organized by concern: Storage and Analytics.

mod analytics_config;
mod storage_config;

pub use analytics_config::AnalyticsEnvConfig;
pub use storage_config::{DEFAULT_DATABASE_URL, StorageBackend, StorageEnvConfig};

use crate::domain::journal::Portfolio;
use anyhow::{Context, Result};
use rust_decimal::Decimal;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub storage_backend: StorageBackend,
    pub database_url: String,

    // Analytics
    pub consistency_window_days: u32,
    pub recent_trades_limit: usize,
    pub currency: String,
    pub initial_capital: Decimal,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let storage = StorageEnvConfig::from_env().context("Failed to load storage config")?;
        let analytics =
            AnalyticsEnvConfig::from_env().context("Failed to load analytics config")?;

        Ok(Self {
            storage_backend: storage.backend,
            database_url: storage.database_url,

            consistency_window_days: analytics.consistency_window_days,
            recent_trades_limit: analytics.recent_trades_limit,
            currency: analytics.currency,
            initial_capital: analytics.initial_capital,
        })
    }

    /// Portfolio used before anything has been saved.
    pub fn default_portfolio(&self) -> Portfolio {
        Portfolio::new(self.currency.clone(), self.initial_capital)
    }
}

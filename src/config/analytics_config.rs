//! Analytics and portfolio defaults parsed from environment variables.

use crate::domain::performance::consistency::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use anyhow::{Context, Result, ensure};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Analytics environment configuration
#[derive(Debug, Clone)]
pub struct AnalyticsEnvConfig {
    /// Days shown by the consistency calendar
    pub consistency_window_days: u32,
    pub recent_trades_limit: usize,

    // Portfolio used until one has been saved
    pub currency: String,
    pub initial_capital: Decimal,
}

impl AnalyticsEnvConfig {
    pub fn from_env() -> Result<Self> {
        let initial_capital_str =
            env::var("INITIAL_CAPITAL").unwrap_or_else(|_| "10000".to_string());

        let consistency_window_days =
            Self::parse_u32("CONSISTENCY_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?;
        ensure!(
            consistency_window_days <= MAX_WINDOW_DAYS,
            "CONSISTENCY_WINDOW_DAYS must be at most {} (got {})",
            MAX_WINDOW_DAYS,
            consistency_window_days
        );

        Ok(Self {
            consistency_window_days,
            recent_trades_limit: Self::parse_usize("RECENT_TRADES_LIMIT", 5)?,
            currency: env::var("CURRENCY").unwrap_or_else(|_| "USD".to_string()),
            initial_capital: Decimal::from_str(&initial_capital_str)
                .context("Failed to parse INITIAL_CAPITAL")?,
        })
    }

    fn parse_u32(key: &str, default: u32) -> Result<u32> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u32>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }
}

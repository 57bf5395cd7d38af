use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use statrs::statistics::Statistics;

/// Shared statistics utilities for journal analytics.
pub struct Stats;

impl Stats {
    /// Non-annualized Sharpe ratio of daily P&L: mean over population std dev.
    ///
    /// Zero with fewer than two days or no dispersion.
    pub fn sharpe_ratio(daily_returns: &[Decimal]) -> f64 {
        if daily_returns.len() < 2 {
            return 0.0;
        }

        // f64 boundary for the statistics library
        let returns: Vec<f64> = daily_returns
            .iter()
            .map(|r| r.to_f64().unwrap_or(0.0))
            .collect();

        let mean = returns.iter().mean();
        let std_dev = returns.iter().population_std_dev();

        if std_dev > 0.0 && std_dev.is_finite() {
            mean / std_dev
        } else {
            0.0
        }
    }

    /// `numerator / denominator`, or zero when the denominator is zero.
    pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sharpe_ratio() {
        // mean 20, population std dev 10
        let returns = vec![dec!(10), dec!(30)];
        assert!((Stats::sharpe_ratio(&returns) - 2.0).abs() < 1e-12);

        let flat = vec![dec!(5), dec!(5), dec!(5)];
        assert_eq!(Stats::sharpe_ratio(&flat), 0.0);
    }

    #[test]
    fn test_sharpe_ratio_needs_two_days() {
        assert_eq!(Stats::sharpe_ratio(&[]), 0.0);
        assert_eq!(Stats::sharpe_ratio(&[dec!(250)]), 0.0);
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(Stats::ratio_or_zero(5.0, 0.0), 0.0);
        assert_eq!(Stats::ratio_or_zero(5.0, 2.0), 2.5);
    }
}

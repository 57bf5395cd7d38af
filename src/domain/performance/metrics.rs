use super::calculator::{closed_trades, daily_pnl, max_drawdown};
use super::stats::Stats;
use crate::domain::journal::Trade;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Aggregate performance of the closed trades in a journal.
///
/// Money fields are in account currency. `avg_loss` is reported as a
/// positive magnitude and `avg_holding_time` is in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    pub total_trades: usize,
    pub win_rate: f64,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: Decimal,
    pub best_day: Decimal,
    pub worst_day: Decimal,
    pub avg_holding_time: f64,
}

impl Analytics {
    /// Calculate analytics from trade history.
    ///
    /// Open trades are ignored. An empty set of closed trades yields the
    /// zero-valued record. `as_of` closes the holding period of trades that
    /// carry no exit timestamp.
    pub fn calculate(trades: &[Trade], as_of: NaiveDateTime) -> Self {
        let closed = closed_trades(trades);
        if closed.is_empty() {
            return Self::default();
        }

        let total_trades = closed.len();
        let pnls: Vec<Decimal> = closed.iter().map(|t| t.effective_pnl()).collect();

        let wins: Vec<Decimal> = pnls.iter().copied().filter(|p| *p > Decimal::ZERO).collect();
        let losses: Vec<Decimal> = pnls.iter().copied().filter(|p| *p < Decimal::ZERO).collect();

        let gross_profit: Decimal = wins.iter().sum();
        let gross_loss: Decimal = losses.iter().sum::<Decimal>().abs();

        let win_rate = wins.len() as f64 / total_trades as f64 * 100.0;
        let avg_win = if wins.is_empty() {
            Decimal::ZERO
        } else {
            gross_profit / Decimal::from(wins.len())
        };
        let avg_loss = if losses.is_empty() {
            Decimal::ZERO
        } else {
            gross_loss / Decimal::from(losses.len())
        };

        // No losses: report gross profit instead of an infinite factor
        let profit_factor = if gross_loss > Decimal::ZERO {
            (gross_profit / gross_loss).to_f64().unwrap_or(0.0)
        } else {
            gross_profit.to_f64().unwrap_or(0.0)
        };

        let daily_returns: Vec<Decimal> = daily_pnl(closed.iter().copied()).into_values().collect();
        let best_day = daily_returns
            .iter()
            .copied()
            .fold(Decimal::ZERO, Decimal::max);
        let worst_day = daily_returns
            .iter()
            .copied()
            .fold(Decimal::ZERO, Decimal::min);

        Self {
            total_trades,
            win_rate,
            avg_win,
            avg_loss,
            profit_factor,
            sharpe_ratio: Stats::sharpe_ratio(&daily_returns),
            max_drawdown: max_drawdown(closed.iter().copied()),
            best_day,
            worst_day,
            avg_holding_time: Self::average_holding_hours(&closed, as_of),
        }
    }

    fn average_holding_hours(closed: &[&Trade], as_of: NaiveDateTime) -> f64 {
        if closed.is_empty() {
            return 0.0;
        }

        let total_hours: f64 = closed
            .iter()
            .map(|t| {
                let exit = t.closed_at.unwrap_or(as_of);
                let seconds = (exit - t.entered_at()).num_seconds().max(0);
                seconds as f64 / 3600.0
            })
            .sum();

        total_hours / closed.len() as f64
    }
}

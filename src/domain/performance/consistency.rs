use super::calculator::daily_pnl;
use super::stats::Stats;
use crate::domain::errors::JournalError;
use crate::domain::journal::Trade;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;

/// 52 full weeks, the calendar grid shown by the heat map.
pub const DEFAULT_WINDOW_DAYS: u32 = 52 * 7;

/// Longest calendar accepted anywhere, roughly ten years.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// One cell of the consistency calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyDay {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: usize,
    /// -4..=4; 0 means no trades or a flat day.
    pub level: i8,
}

/// Intensity tier for a day's net P&L.
pub fn level_for(pnl: Decimal) -> i8 {
    let magnitude = pnl.abs();
    let tier = if magnitude >= dec!(1000) {
        4
    } else if magnitude >= dec!(500) {
        3
    } else if magnitude >= dec!(100) {
        2
    } else if magnitude > Decimal::ZERO {
        1
    } else {
        0
    };

    if pnl < Decimal::ZERO { -tier } else { tier }
}

/// Day-by-day closed-trade activity over `days` calendar days ending at `end`.
///
/// Every day of the window appears exactly once in ascending order, including
/// days without trades. Windows longer than [`MAX_WINDOW_DAYS`], or reaching
/// before the earliest representable date, are rejected.
pub fn consistency_series(
    trades: &[Trade],
    end: NaiveDate,
    days: u32,
) -> Result<Vec<ConsistencyDay>, JournalError> {
    if days == 0 {
        return Ok(Vec::new());
    }

    let invalid = || JournalError::InvalidWindow {
        days,
        max: MAX_WINDOW_DAYS,
    };
    if days > MAX_WINDOW_DAYS {
        return Err(invalid());
    }
    let start = end
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(invalid)?;

    let in_window = trades
        .iter()
        .filter(|t| t.is_closed() && t.date >= start && t.date <= end);

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for trade in in_window.clone() {
        *counts.entry(trade.date).or_insert(0) += 1;
    }
    let pnl_by_day = daily_pnl(in_window);

    Ok(start
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let trades = counts.get(&date).copied().unwrap_or(0);
            let pnl = pnl_by_day.get(&date).copied().unwrap_or(Decimal::ZERO);
            let level = if trades == 0 { 0 } else { level_for(pnl) };
            ConsistencyDay {
                date,
                pnl,
                trades,
                level,
            }
        })
        .collect())
}

/// Splits a series into calendar weeks starting on Sunday. The first and last
/// weeks may be partial.
pub fn calendar_weeks(series: &[ConsistencyDay]) -> Vec<&[ConsistencyDay]> {
    let mut weeks = Vec::new();
    let mut start = 0;
    for (i, day) in series.iter().enumerate() {
        if i > start && day.date.weekday() == Weekday::Sun {
            weeks.push(&series[start..i]);
            start = i;
        }
    }
    if start < series.len() {
        weeks.push(&series[start..]);
    }
    weeks
}

/// Headline numbers shown above the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencySummary {
    pub trading_days: usize,
    pub profitable_days: usize,
    pub consistency_rate: f64,
}

pub fn consistency_summary(series: &[ConsistencyDay]) -> ConsistencySummary {
    let trading_days = series.iter().filter(|d| d.trades > 0).count();
    let profitable_days = series.iter().filter(|d| d.pnl > Decimal::ZERO).count();
    let consistency_rate =
        Stats::ratio_or_zero(profitable_days as f64, trading_days as f64) * 100.0;

    ConsistencySummary {
        trading_days,
        profitable_days,
        consistency_rate,
    }
}

use crate::domain::journal::{Direction, Trade};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Realized P&L of a trade in account currency.
///
/// Zero while the trade is open or has no exit price. Fees default to zero.
pub fn realized_pnl(trade: &Trade) -> Decimal {
    let exit_price = match trade.exit_price {
        Some(price) if !trade.is_open => price,
        _ => return Decimal::ZERO,
    };

    let delta = match trade.direction {
        Direction::Long => exit_price - trade.entry_price,
        Direction::Short => trade.entry_price - exit_price,
    };

    delta * trade.position_size - trade.fees.unwrap_or(Decimal::ZERO)
}

/// Closed trades in input order.
pub fn closed_trades(trades: &[Trade]) -> Vec<&Trade> {
    trades.iter().filter(|t| t.is_closed()).collect()
}

/// Sums closed-trade P&L per calendar date, keyed in ascending date order.
pub fn daily_pnl<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<NaiveDate, Decimal> {
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for trade in trades.into_iter().filter(|t| t.is_closed()) {
        *days.entry(trade.date).or_insert(Decimal::ZERO) += trade.effective_pnl();
    }
    days
}

/// Largest peak-to-trough decline of the running P&L, scanning in input order.
///
/// The peak starts at zero, so an opening loss already counts as drawdown.
pub fn max_drawdown<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut running = Decimal::ZERO;
    let mut max_dd = Decimal::ZERO;

    for trade in trades.into_iter().filter(|t| t.is_closed()) {
        running += trade.effective_pnl();
        if running > peak {
            peak = running;
        }
        let drawdown = peak - running;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }

    max_dd
}

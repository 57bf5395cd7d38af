use crate::domain::journal::Trade;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlPoint {
    pub trade_number: usize,
    pub date: NaiveDate,
    pub asset: String,
    pub pnl: Decimal,
    pub cumulative: Decimal,
}

/// Cumulative realized P&L of closed trades in chronological order.
///
/// Trades are ordered by entry date and time; ties keep their input order.
pub fn pnl_curve(trades: &[Trade]) -> Vec<PnlPoint> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
    closed.sort_by_key(|t| t.entered_at());

    let mut cumulative = Decimal::ZERO;
    closed
        .into_iter()
        .enumerate()
        .map(|(i, trade)| {
            let pnl = trade.effective_pnl();
            cumulative += pnl;
            PnlPoint {
                trade_number: i + 1,
                date: trade.date,
                asset: trade.asset.clone(),
                pnl,
                cumulative,
            }
        })
        .collect()
}

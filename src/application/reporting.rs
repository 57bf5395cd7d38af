//! Console output for journal analytics.
//!
//! Provides formatted tables for the CLI and JSON export.

use crate::domain::journal::{Asset, Goal, JournalEntry, Portfolio, Trade};
use crate::domain::performance::{
    Analytics, ConsistencyDay, GoalAnalytics, PnlPoint, calendar_weeks, consistency_summary,
};
use anyhow::{Context, Result};
use chrono::{Datelike, Duration};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;

/// Heat-map glyphs from heaviest loss to heaviest gain.
const LEVEL_GLYPHS: [char; 9] = ['▓', '▒', '░', '-', '·', '+', '*', '#', '@'];

pub struct JournalReporter {
    currency: String,
}

impl JournalReporter {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }

    pub fn print_analytics(&self, analytics: &Analytics) {
        println!("\n{}", "=".repeat(60));
        println!("📊 TRADING ANALYTICS");
        println!("{}", "=".repeat(60));
        println!("  Closed trades:    {}", analytics.total_trades);
        println!("  Win rate:         {:.1}%", analytics.win_rate);
        println!("  Avg win:          {} {:.2}", self.currency, analytics.avg_win);
        println!("  Avg loss:         {} {:.2}", self.currency, analytics.avg_loss);
        println!("  Profit factor:    {:.2}", analytics.profit_factor);
        println!("  Sharpe ratio:     {:.2}", analytics.sharpe_ratio);
        println!("  Max drawdown:     {} {:.2}", self.currency, analytics.max_drawdown);
        println!("  Best day:         {} {:.2}", self.currency, analytics.best_day);
        println!("  Worst day:        {} {:.2}", self.currency, analytics.worst_day);
        println!("  Avg holding time: {:.1} h", analytics.avg_holding_time);
        println!("{}\n", "=".repeat(60));
    }

    pub fn print_portfolio(&self, portfolio: &Portfolio) {
        let summary = portfolio.summary();
        println!(
            "💼 Balance {} {:.2} (initial {:.2})",
            portfolio.currency, portfolio.current_balance, portfolio.initial_capital
        );
        println!(
            "   Total P&L {:.2} ({:+.2}%), deposits {:.2}, withdrawals {:.2}",
            summary.total_pnl,
            summary.total_return_pct,
            summary.total_deposits,
            summary.total_withdrawals
        );
    }

    /// Prints the calendar as Sunday-to-Saturday rows, oldest week first.
    pub fn print_calendar(&self, days: &[ConsistencyDay]) {
        let summary = consistency_summary(days);
        println!(
            "\n📅 {} trading days, {} profitable ({:.1}%)",
            summary.trading_days, summary.profitable_days, summary.consistency_rate
        );
        println!("  {:<10} SMTWTFS", "Week of");
        for row in Self::calendar_rows(days) {
            println!("  {}", row);
        }
        println!();
    }

    /// One line per calendar week: the week's Sunday, a glyph per day and the
    /// week's net P&L. Days outside the window are blank.
    fn calendar_rows(days: &[ConsistencyDay]) -> Vec<String> {
        calendar_weeks(days)
            .into_iter()
            .filter_map(|week| {
                let first = week.first()?;
                let offset = first.date.weekday().num_days_from_sunday() as usize;
                let sunday = first.date - Duration::days(offset as i64);

                let mut cells = " ".repeat(offset);
                cells.extend(week.iter().map(|d| Self::glyph(d.level)));
                let net: Decimal = week.iter().map(|d| d.pnl).sum();
                Some(format!("{} {:<7} {:>12.2}", sunday, cells, net))
            })
            .collect()
    }

    pub fn print_assets(&self, assets: &[Asset]) {
        if assets.is_empty() {
            println!("No assets match.");
            return;
        }

        println!(
            "{:<3} {:<10} {:<24} {:<12} {:<10} {}",
            "", "Symbol", "Name", "Category", "Exchange", "Id"
        );
        println!("{}", "-".repeat(100));
        for asset in assets {
            let star = if asset.is_active { "★" } else { "☆" };
            println!(
                "{:<3} {:<10} {:<24} {:<12} {:<10} {}",
                star,
                asset.symbol,
                asset.name,
                asset.category,
                asset.exchange.as_deref().unwrap_or("-"),
                asset.id
            );
        }
    }

    pub fn print_entries(&self, entries: &[JournalEntry]) {
        for entry in entries {
            println!("\n📝 {} {} [{}] ({})", entry.date, entry.title, entry.mood, entry.id);
            if !entry.tags.is_empty() {
                println!("   #{}", entry.tags.join(" #"));
            }
            println!("   {}", entry.content);
        }
        println!();
    }

    pub fn print_goals(&self, goals: &[(Goal, GoalAnalytics)]) {
        if goals.is_empty() {
            println!("No active goals.");
            return;
        }

        for (goal, analytics) in goals {
            println!(
                "\n🎯 {} {} goal: target {} (priority {})",
                goal.goal_type, goal.category, goal.target, goal.priority
            );
            if !goal.description.is_empty() {
                println!("   {}", goal.description);
            }
            println!(
                "   Current {:.2}, progress {:.1}%, {} days left",
                analytics.current, analytics.progress, analytics.days_remaining
            );
            println!(
                "   Rating: {} ({})",
                analytics.performance_rating,
                analytics.performance_rating.description()
            );
            println!(
                "   Achievement probability: {:.0}%",
                analytics.achievement_probability
            );
            for insight in &analytics.insights {
                println!("   • {}", insight);
            }
        }
        println!();
    }

    pub fn print_curve(&self, points: &[PnlPoint]) {
        println!(
            "{:<5} | {:<10} | {:<8} | {:>12} | {:>12}",
            "#", "Date", "Asset", "P&L", "Cumulative"
        );
        println!("{}", "-".repeat(60));
        for point in points {
            println!(
                "{:<5} | {:<10} | {:<8} | {:>12.2} | {:>12.2}",
                point.trade_number, point.date, point.asset, point.pnl, point.cumulative
            );
        }
    }

    pub fn print_trades(&self, trades: &[Trade]) {
        for trade in trades {
            let status = if trade.is_closed() {
                format!("closed {:.2}", trade.effective_pnl())
            } else {
                "open".to_string()
            };
            println!(
                "  {} {} {} {} x{} @ {} [{}]",
                trade.id,
                trade.date,
                trade.direction,
                trade.asset,
                trade.position_size,
                trade.entry_price,
                status
            );
        }
    }

    /// Writes any serializable report as pretty JSON.
    pub fn export_json<T: Serialize + ?Sized>(
        &self,
        value: &T,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("💾 Report saved to {}", path.display());
        Ok(())
    }

    fn glyph(level: i8) -> char {
        let index = (level.clamp(-4, 4) + 4) as usize;
        LEVEL_GLYPHS[index]
    }
}

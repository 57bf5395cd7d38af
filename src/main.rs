//! Trade Journal CLI
//!
//! Records trades and goals and prints performance analytics.
//!
//! # Usage
//! ```sh
//! trade-journal add-trade --asset AAPL --direction long --entry 187.5 --size 10
//! trade-journal close-trade <id> 190.25
//! trade-journal analytics --json analytics.json
//! trade-journal calendar --days 90
//! trade-journal add-asset BTC Bitcoin --category crypto
//! trade-journal add-entry "Post-market" "Held winners longer" --mood positive
//! ```
//!
//! # Environment Variables
//! - `STORAGE_BACKEND` - `sqlite` (default) or `memory`
//! - `DATABASE_URL` - SQLite location (default: `sqlite://data/journal.db`)
//! - `CONSISTENCY_WINDOW_DAYS` - Calendar length in days (default: 364)
//! - `CURRENCY`, `INITIAL_CAPITAL` - Portfolio used until one is saved
//! - `RECENT_TRADES_LIMIT` - Trades listed by `recent` (default: 5)

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use trade_journal::application::{JournalReporter, build_service};
use trade_journal::config::Config;
use trade_journal::domain::journal::{
    Asset, AssetCategory, AssetFilter, Direction, EmotionalState, Goal, GoalCategory, GoalType,
    JournalEntry, Mood, Priority, Trade, Transaction, TransactionKind,
};
use trade_journal::domain::performance::consistency::MAX_WINDOW_DAYS;

#[derive(Parser)]
#[command(author, version, about = "Trading journal analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate statistics over all closed trades
    Analytics {
        /// Also write the figures to this JSON file
        #[arg(long)]
        json: Option<String>,
    },
    /// Day-by-day P&L calendar ending today
    Calendar {
        /// Window length in days (defaults to CONSISTENCY_WINDOW_DAYS)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,
    },
    /// Progress of every active goal
    Goals,
    /// Cumulative P&L trade by trade
    Curve,
    /// Most recently journaled trades
    Recent {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Balance and transaction totals
    Portfolio,
    /// Journal a new trade
    AddTrade {
        #[arg(short, long)]
        asset: String,

        /// long/buy or short/sell
        #[arg(short, long)]
        direction: String,

        #[arg(short, long)]
        entry: Decimal,

        #[arg(short, long)]
        size: Decimal,

        /// Exit price; records the trade as already closed
        #[arg(long)]
        exit: Option<Decimal>,

        #[arg(long)]
        fees: Option<Decimal>,

        /// Entry date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Entry time (HH:MM, default now)
        #[arg(long)]
        time: Option<String>,

        #[arg(long, default_value = "")]
        strategy: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        market_conditions: String,

        /// confident, nervous, neutral, excited or frustrated
        #[arg(long)]
        emotion: Option<String>,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Close an open trade at the given exit price
    CloseTrade { id: String, exit: Decimal },
    /// Delete a trade
    DeleteTrade { id: String },
    /// Create a goal for the current period
    AddGoal {
        /// daily, weekly, monthly or yearly
        #[arg(short = 't', long)]
        goal_type: String,

        /// profit, winrate, trades or drawdown
        #[arg(short, long)]
        category: String,

        #[arg(long)]
        target: f64,

        /// Deadline (YYYY-MM-DD, default end of the current period)
        #[arg(long)]
        deadline: Option<String>,

        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a goal; omitted fields keep their value
    UpdateGoal {
        id: String,

        #[arg(short = 't', long)]
        goal_type: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        target: Option<f64>,

        #[arg(long)]
        deadline: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Pause or resume a goal
    SetGoalActive {
        id: String,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a goal
    DeleteGoal { id: String },
    /// List the asset catalogue
    Assets {
        /// Match symbol or name
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Add an asset to the catalogue
    AddAsset {
        symbol: String,
        name: String,

        /// stocks, crypto, forex, commodities, indices or options
        #[arg(short, long, default_value = "stocks")]
        category: String,

        #[arg(long)]
        exchange: Option<String>,

        #[arg(long)]
        sector: Option<String>,
    },
    /// Edit an asset; omitted fields keep their value
    UpdateAsset {
        id: String,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        exchange: Option<String>,

        #[arg(long)]
        sector: Option<String>,
    },
    /// Star or unstar an asset
    ToggleFavorite { id: String },
    /// Remove an asset from the catalogue
    DeleteAsset { id: String },
    /// Write a journal entry
    AddEntry {
        title: String,
        content: String,

        /// positive, negative or neutral
        #[arg(short, long, default_value = "neutral")]
        mood: String,

        /// Entry date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Journal entries, newest first
    Entries {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete a journal entry
    DeleteEntry { id: String },
    /// Record a deposit
    Deposit { amount: Decimal },
    /// Record a withdrawal
    Withdraw { amount: Decimal },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so reports stay clean on stdout
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Backend={:?}, Window={}d",
        config.storage_backend, config.consistency_window_days
    );

    let service = build_service(&config).await?;
    let reporter = JournalReporter::new(&config.currency);
    // Whole seconds, so every backend stores the same timestamps
    let now = Local::now().naive_local().trunc_subsecs(0);
    let today = now.date();

    match cli.command {
        Commands::Analytics { json } => {
            let analytics = service.analytics(now).await?;
            reporter.print_analytics(&analytics);
            if let Some(path) = json {
                reporter.export_json(&analytics, path)?;
            }
        }
        Commands::Calendar { days } => {
            reporter.print_calendar(&service.consistency(today, days).await?);
        }
        Commands::Goals => {
            let goals = service.active_goal_analytics(today).await?;
            reporter.print_goals(&goals);
        }
        Commands::Curve => {
            reporter.print_curve(&service.pnl_curve().await?);
        }
        Commands::Recent { limit } => {
            let limit = limit.unwrap_or(config.recent_trades_limit);
            reporter.print_trades(&service.recent_trades(limit).await?);
        }
        Commands::Portfolio => {
            reporter.print_portfolio(&service.portfolio().await?);
        }
        Commands::AddTrade {
            asset,
            direction,
            entry,
            size,
            exit,
            fees,
            date,
            time,
            strategy,
            notes,
            market_conditions,
            emotion,
            tags,
        } => {
            let entered_at = parse_entry(date.as_deref(), time.as_deref(), now)?;
            let direction = Direction::from_str(&direction)?;
            let mut trade =
                Trade::open(asset, direction, entry, size, entered_at).with_strategy(strategy);
            if let Some(fees) = fees {
                trade = trade.with_fees(fees);
            }
            trade.notes = notes;
            trade.market_conditions = market_conditions;
            trade.emotional_state = emotion
                .as_deref()
                .map(EmotionalState::from_str)
                .transpose()?;
            trade.tags = split_tags(&tags);
            if let Some(exit) = exit {
                trade.close(exit, now.max(entered_at))?;
            }

            let trade = service.add_trade(trade).await?;
            println!("✅ Trade {} journaled", trade.id);
        }
        Commands::CloseTrade { id, exit } => {
            let trade = service.close_trade(&id, exit, now).await?;
            println!(
                "✅ Closed {} with P&L {} {:.2}",
                trade.asset,
                config.currency,
                trade.effective_pnl()
            );
        }
        Commands::DeleteTrade { id } => {
            service.delete_trade(&id).await?;
            println!("🗑️ Trade {} deleted", id);
        }
        Commands::AddGoal {
            goal_type,
            category,
            target,
            deadline,
            priority,
            description,
        } => {
            let goal_type = GoalType::from_str(&goal_type)?;
            let deadline = match deadline {
                Some(d) => parse_date(&d)?,
                None => goal_type.current_window(today).1,
            };
            let category = GoalCategory::from_str(&category)?;
            let mut goal = Goal::new(goal_type, category, target, today, deadline);
            goal.priority = Priority::from_str(&priority)?;
            goal.description = description;

            let goal = service.add_goal(goal).await?;
            println!("✅ Goal {} created (deadline {})", goal.id, goal.deadline);
        }
        Commands::UpdateGoal {
            id,
            goal_type,
            category,
            target,
            deadline,
            priority,
            description,
        } => {
            let mut goal = service
                .goals()
                .await?
                .into_iter()
                .find(|g| g.id == id)
                .with_context(|| format!("Goal not found: {}", id))?;
            if let Some(goal_type) = goal_type {
                goal.goal_type = GoalType::from_str(&goal_type)?;
            }
            if let Some(category) = category {
                goal.category = GoalCategory::from_str(&category)?;
            }
            if let Some(target) = target {
                goal.target = target;
            }
            if let Some(deadline) = deadline {
                goal.deadline = parse_date(&deadline)?;
            }
            if let Some(priority) = priority {
                goal.priority = Priority::from_str(&priority)?;
            }
            if let Some(description) = description {
                goal.description = description;
            }

            let goal = service.update_goal(goal).await?;
            println!("✅ Goal {} updated (deadline {})", goal.id, goal.deadline);
        }
        Commands::SetGoalActive { id, active } => {
            let goal = service.set_goal_active(&id, active).await?;
            println!("✅ Goal {} active: {}", goal.id, goal.is_active);
        }
        Commands::DeleteGoal { id } => {
            service.delete_goal(&id).await?;
            println!("🗑️ Goal {} deleted", id);
        }
        Commands::Assets {
            search,
            category,
            favorites,
        } => {
            let filter = AssetFilter {
                search,
                category: category
                    .as_deref()
                    .map(AssetCategory::from_str)
                    .transpose()?,
                favorites_only: favorites,
            };
            reporter.print_assets(&service.assets(&filter).await?);
        }
        Commands::AddAsset {
            symbol,
            name,
            category,
            exchange,
            sector,
        } => {
            let mut asset = Asset::new(&symbol, &name, AssetCategory::from_str(&category)?)?;
            asset.exchange = exchange;
            asset.sector = sector;

            let asset = service.add_asset(asset).await?;
            println!("✅ Asset {} added ({})", asset.symbol, asset.id);
        }
        Commands::UpdateAsset {
            id,
            symbol,
            name,
            category,
            exchange,
            sector,
        } => {
            let mut asset = service
                .assets(&AssetFilter::default())
                .await?
                .into_iter()
                .find(|a| a.id == id)
                .with_context(|| format!("Asset not found: {}", id))?;
            if let Some(symbol) = symbol {
                asset.symbol = symbol;
            }
            if let Some(name) = name {
                asset.name = name;
            }
            if let Some(category) = category {
                asset.category = AssetCategory::from_str(&category)?;
            }
            if exchange.is_some() {
                asset.exchange = exchange;
            }
            if sector.is_some() {
                asset.sector = sector;
            }

            let asset = service.update_asset(asset).await?;
            println!("✅ Asset {} updated", asset.symbol);
        }
        Commands::ToggleFavorite { id } => {
            let asset = service.toggle_favorite(&id).await?;
            let state = if asset.is_active { "starred" } else { "unstarred" };
            println!("⭐ {} {}", asset.symbol, state);
        }
        Commands::DeleteAsset { id } => {
            service.delete_asset(&id).await?;
            println!("🗑️ Asset {} deleted", id);
        }
        Commands::AddEntry {
            title,
            content,
            mood,
            date,
            tags,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };
            let mut entry = JournalEntry::new(date, title, content);
            entry.mood = Mood::from_str(&mood)?;
            entry.tags = split_tags(&tags);

            let entry = service.add_journal_entry(entry).await?;
            println!("✅ Entry {} saved for {}", entry.id, entry.date);
        }
        Commands::Entries { limit } => {
            let mut entries = service.journal_entries().await?;
            entries.truncate(limit.unwrap_or(config.recent_trades_limit));
            reporter.print_entries(&entries);
        }
        Commands::DeleteEntry { id } => {
            service.delete_journal_entry(&id).await?;
            println!("🗑️ Entry {} deleted", id);
        }
        Commands::Deposit { amount } => {
            let portfolio = service
                .record_transaction(Transaction::new(TransactionKind::Deposit, amount, today))
                .await?;
            reporter.print_portfolio(&portfolio);
        }
        Commands::Withdraw { amount } => {
            let portfolio = service
                .record_transaction(Transaction::new(TransactionKind::Withdrawal, amount, today))
                .await?;
            reporter.print_portfolio(&portfolio);
        }
    }

    Ok(())
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").context(format!("Invalid date: {}", s))
}

fn parse_entry(
    date: Option<&str>,
    time: Option<&str>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime> {
    let date = match date {
        Some(d) => parse_date(d)?,
        None => now.date(),
    };
    let time = match time {
        Some(t) => {
            NaiveTime::parse_from_str(t, "%H:%M").context(format!("Invalid time: {}", t))?
        }
        None => now.time(),
    };
    Ok(date.and_time(time))
}

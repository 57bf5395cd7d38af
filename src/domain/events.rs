use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Changes to journal data, published after each successful store update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JournalEvent {
    TradeAdded {
        trade_id: String,
        asset: String,
    },
    TradeUpdated {
        trade_id: String,
    },
    TradeClosed {
        trade_id: String,
        asset: String,
        pnl: Decimal,
    },
    TradeDeleted {
        trade_id: String,
    },
    GoalAdded {
        goal_id: String,
    },
    GoalUpdated {
        goal_id: String,
        is_active: bool,
    },
    GoalDeleted {
        goal_id: String,
    },
    PortfolioUpdated {
        balance: Decimal,
    },
    AssetAdded {
        asset_id: String,
        symbol: String,
    },
    AssetUpdated {
        asset_id: String,
        is_active: bool,
    },
    AssetDeleted {
        asset_id: String,
    },
    JournalEntryAdded {
        entry_id: String,
        date: NaiveDate,
    },
    JournalEntryDeleted {
        entry_id: String,
    },
}

/// Receives journal events from the bus
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &JournalEvent);
}

/// Writes every event to the tracing log
pub struct LoggingListener;

impl EventListener for LoggingListener {
    fn on_event(&self, event: &JournalEvent) {
        match event {
            JournalEvent::TradeAdded { trade_id, asset } => {
                info!(trade_id = %trade_id, asset = %asset, "Trade added");
            }
            JournalEvent::TradeUpdated { trade_id } => {
                info!(trade_id = %trade_id, "Trade updated");
            }
            JournalEvent::TradeClosed {
                trade_id,
                asset,
                pnl,
            } => {
                info!(trade_id = %trade_id, asset = %asset, pnl = %pnl, "Trade closed");
            }
            JournalEvent::TradeDeleted { trade_id } => {
                info!(trade_id = %trade_id, "Trade deleted");
            }
            JournalEvent::GoalAdded { goal_id } => {
                info!(goal_id = %goal_id, "Goal added");
            }
            JournalEvent::GoalUpdated { goal_id, is_active } => {
                info!(goal_id = %goal_id, is_active, "Goal updated");
            }
            JournalEvent::GoalDeleted { goal_id } => {
                info!(goal_id = %goal_id, "Goal deleted");
            }
            JournalEvent::PortfolioUpdated { balance } => {
                info!(balance = %balance, "Portfolio updated");
            }
            JournalEvent::AssetAdded { asset_id, symbol } => {
                info!(asset_id = %asset_id, symbol = %symbol, "Asset added");
            }
            JournalEvent::AssetUpdated {
                asset_id,
                is_active,
            } => {
                info!(asset_id = %asset_id, is_active, "Asset updated");
            }
            JournalEvent::AssetDeleted { asset_id } => {
                info!(asset_id = %asset_id, "Asset deleted");
            }
            JournalEvent::JournalEntryAdded { entry_id, date } => {
                info!(entry_id = %entry_id, date = %date, "Journal entry added");
            }
            JournalEvent::JournalEntryDeleted { entry_id } => {
                info!(entry_id = %entry_id, "Journal entry deleted");
            }
        }
    }
}

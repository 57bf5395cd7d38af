use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by journal records and their stores
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Trade {id} is already closed")]
    TradeAlreadyClosed { id: String },

    #[error("Invalid transaction amount: {amount} (must be positive)")]
    InvalidAmount { amount: Decimal },

    #[error("Invalid calendar window: {days} days (maximum {max})")]
    InvalidWindow { days: u32, max: u32 },

    #[error("Invalid direction: {value}. Must be 'long' or 'short'")]
    InvalidDirection { value: String },

    #[error("Invalid goal type: {value}. Must be 'daily', 'weekly', 'monthly' or 'yearly'")]
    InvalidGoalType { value: String },

    #[error("Invalid goal category: {value}. Must be 'profit', 'winrate', 'trades' or 'drawdown'")]
    InvalidGoalCategory { value: String },

    #[error("Invalid priority: {value}. Must be 'low', 'medium' or 'high'")]
    InvalidPriority { value: String },

    #[error(
        "Invalid emotional state: {value}. Must be 'confident', 'nervous', 'neutral', 'excited' or 'frustrated'"
    )]
    InvalidEmotionalState { value: String },

    #[error(
        "Invalid asset category: {value}. Must be 'stocks', 'crypto', 'forex', 'commodities', 'indices' or 'options'"
    )]
    InvalidAssetCategory { value: String },

    #[error("Invalid mood: {value}. Must be 'positive', 'negative' or 'neutral'")]
    InvalidMood { value: String },

    #[error("Asset symbol and name are required")]
    MissingAssetFields,
}

impl JournalError {
    pub fn trade_not_found(id: &str) -> Self {
        JournalError::NotFound {
            kind: "Trade",
            id: id.to_string(),
        }
    }

    pub fn goal_not_found(id: &str) -> Self {
        JournalError::NotFound {
            kind: "Goal",
            id: id.to_string(),
        }
    }

    pub fn asset_not_found(id: &str) -> Self {
        JournalError::NotFound {
            kind: "Asset",
            id: id.to_string(),
        }
    }

    pub fn entry_not_found(id: &str) -> Self {
        JournalError::NotFound {
            kind: "Journal entry",
            id: id.to_string(),
        }
    }
}

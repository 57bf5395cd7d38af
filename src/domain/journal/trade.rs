use crate::domain::errors::JournalError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl FromStr for Direction {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" | "buy" => Ok(Direction::Long),
            "short" | "sell" => Ok(Direction::Short),
            _ => Err(JournalError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// How the trader felt when taking the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Confident,
    Nervous,
    Neutral,
    Excited,
    Frustrated,
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmotionalState::Confident => write!(f, "confident"),
            EmotionalState::Nervous => write!(f, "nervous"),
            EmotionalState::Neutral => write!(f, "neutral"),
            EmotionalState::Excited => write!(f, "excited"),
            EmotionalState::Frustrated => write!(f, "frustrated"),
        }
    }
}

impl FromStr for EmotionalState {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confident" => Ok(EmotionalState::Confident),
            "nervous" => Ok(EmotionalState::Nervous),
            "neutral" => Ok(EmotionalState::Neutral),
            "excited" => Ok(EmotionalState::Excited),
            "frustrated" => Ok(EmotionalState::Frustrated),
            _ => Err(JournalError::InvalidEmotionalState {
                value: s.to_string(),
            }),
        }
    }
}

/// A journaled trade.
///
/// The analytics engine only reads trades. A trade counts as closed once
/// `is_open` is false and an exit price has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub asset: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub position_size: Decimal,
    pub fees: Option<Decimal>,
    pub is_open: bool,
    /// Stored realized P&L. Recomputed from prices when absent.
    pub pnl: Option<Decimal>,
    /// Exit timestamp, only known for trades closed through [`Trade::close`].
    pub closed_at: Option<NaiveDateTime>,
    pub strategy: String,
    pub notes: String,
    pub market_conditions: String,
    pub emotional_state: Option<EmotionalState>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Creates an open trade with no exit.
    pub fn open(
        asset: impl Into<String>,
        direction: Direction,
        entry_price: Decimal,
        position_size: Decimal,
        entered_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: entered_at.date(),
            time: entered_at.time(),
            asset: asset.into(),
            direction,
            entry_price,
            exit_price: None,
            position_size,
            fees: None,
            is_open: true,
            pnl: None,
            closed_at: None,
            strategy: String::new(),
            notes: String::new(),
            market_conditions: String::new(),
            emotional_state: None,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_fees(mut self, fees: Decimal) -> Self {
        self.fees = Some(fees);
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open && self.exit_price.is_some()
    }

    pub fn entered_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Realized P&L used by every aggregate: the stored value when present,
    /// otherwise derived from prices.
    pub fn effective_pnl(&self) -> Decimal {
        self.pnl
            .unwrap_or_else(|| crate::domain::performance::calculator::realized_pnl(self))
    }

    /// Closes the position at `exit_price` and stores its realized P&L.
    pub fn close(
        &mut self,
        exit_price: Decimal,
        closed_at: NaiveDateTime,
    ) -> Result<Decimal, JournalError> {
        if self.is_closed() {
            return Err(JournalError::TradeAlreadyClosed {
                id: self.id.clone(),
            });
        }

        self.exit_price = Some(exit_price);
        self.is_open = false;
        self.closed_at = Some(closed_at);

        let pnl = crate::domain::performance::calculator::realized_pnl(self);
        self.pnl = Some(pnl);
        Ok(pnl)
    }
}

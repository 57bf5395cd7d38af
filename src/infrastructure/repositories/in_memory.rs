//! In-Memory Repository Implementations
//!
//! Thread-safe, in-memory implementations of the repository traits defined
//! in `domain::repositories`.
//!
//! # Limitations
//!
//! - Data is lost on application restart
//! - No sharing across processes
//!
//! For durable storage use the SQLite repositories in `infrastructure::persistence`.

use crate::domain::errors::JournalError;
use crate::domain::journal::{Asset, Goal, JournalEntry, Portfolio, Trade};
use crate::domain::repositories::{
    AssetRepository, GoalRepository, JournalEntryRepository, PortfolioRepository, TradeRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of TradeRepository
pub struct InMemoryTradeRepository {
    trades: Arc<RwLock<Vec<Trade>>>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self {
            trades: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryTradeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn get_all(&self) -> Result<Vec<Trade>> {
        Ok(self.trades.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Trade>> {
        let trades = self.trades.read().await;
        Ok(trades.iter().find(|t| t.id == id).cloned())
    }

    async fn add(&self, trade: &Trade) -> Result<()> {
        // Newest first
        self.trades.write().await.insert(0, trade.clone());
        Ok(())
    }

    async fn update(&self, trade: &Trade) -> Result<()> {
        let mut trades = self.trades.write().await;
        let slot = trades
            .iter_mut()
            .find(|t| t.id == trade.id)
            .ok_or_else(|| JournalError::trade_not_found(&trade.id))?;
        *slot = trade.clone();
        Ok(())
    }

    async fn close(&self, trade: &Trade) -> Result<()> {
        let mut trades = self.trades.write().await;
        let slot = trades
            .iter_mut()
            .find(|t| t.id == trade.id)
            .ok_or_else(|| JournalError::trade_not_found(&trade.id))?;
        if slot.is_closed() {
            return Err(JournalError::TradeAlreadyClosed {
                id: trade.id.clone(),
            }
            .into());
        }
        *slot = trade.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut trades = self.trades.write().await;
        let before = trades.len();
        trades.retain(|t| t.id != id);
        if trades.len() == before {
            return Err(JournalError::trade_not_found(id).into());
        }
        Ok(())
    }
}

/// In-memory implementation of GoalRepository
pub struct InMemoryGoalRepository {
    goals: Arc<RwLock<Vec<Goal>>>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self {
            goals: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryGoalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn get_all(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Goal>> {
        let goals = self.goals.read().await;
        Ok(goals.iter().find(|g| g.id == id).cloned())
    }

    async fn add(&self, goal: &Goal) -> Result<()> {
        self.goals.write().await.insert(0, goal.clone());
        Ok(())
    }

    async fn update(&self, goal: &Goal) -> Result<()> {
        let mut goals = self.goals.write().await;
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| JournalError::goal_not_found(&goal.id))?;
        *slot = goal.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut goals = self.goals.write().await;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Err(JournalError::goal_not_found(id).into());
        }
        Ok(())
    }
}

/// In-memory implementation of PortfolioRepository
pub struct InMemoryPortfolioRepository {
    portfolio: Arc<RwLock<Portfolio>>,
}

impl InMemoryPortfolioRepository {
    pub fn new(initial: Portfolio) -> Self {
        Self {
            portfolio: Arc::new(RwLock::new(initial)),
        }
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn load(&self) -> Result<Portfolio> {
        Ok(self.portfolio.read().await.clone())
    }

    async fn save(&self, portfolio: &Portfolio) -> Result<()> {
        *self.portfolio.write().await = portfolio.clone();
        Ok(())
    }
}

/// In-memory implementation of AssetRepository
pub struct InMemoryAssetRepository {
    assets: Arc<RwLock<Vec<Asset>>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryAssetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn get_all(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Asset>> {
        let assets = self.assets.read().await;
        Ok(assets.iter().find(|a| a.id == id).cloned())
    }

    async fn add(&self, asset: &Asset) -> Result<()> {
        self.assets.write().await.insert(0, asset.clone());
        Ok(())
    }

    async fn update(&self, asset: &Asset) -> Result<()> {
        let mut assets = self.assets.write().await;
        let slot = assets
            .iter_mut()
            .find(|a| a.id == asset.id)
            .ok_or_else(|| JournalError::asset_not_found(&asset.id))?;
        *slot = asset.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut assets = self.assets.write().await;
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Err(JournalError::asset_not_found(id).into());
        }
        Ok(())
    }
}

/// In-memory implementation of JournalEntryRepository
#[derive(Default)]
pub struct InMemoryJournalEntryRepository {
    entries: RwLock<Vec<JournalEntry>>,
}

impl InMemoryJournalEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalEntryRepository for InMemoryJournalEntryRepository {
    async fn get_all(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn add(&self, entry: &JournalEntry) -> Result<()> {
        self.entries.write().await.insert(0, entry.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let position = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| JournalError::entry_not_found(id))?;
        entries.remove(position);
        Ok(())
    }
}

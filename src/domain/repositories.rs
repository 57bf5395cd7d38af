//! Repository Pattern Abstractions
//!
//! This module defines the storage contract for journal data so the
//! analytics and service layers never depend on a concrete backend.
//!
//! # Design
//!
//! One asynchronous interface per record kind:
//! - `TradeRepository`: CRUD over journaled trades
//! - `GoalRepository`: CRUD over goals
//! - `PortfolioRepository`: the single account snapshot
//! - `AssetRepository`: the instrument catalogue
//! - `JournalEntryRepository`: diary notes
//!
//! # Implementations
//!
//! - `InMemory*Repository`: `Arc<RwLock>` storage for tests and ephemeral sessions
//! - `Sqlite*Repository`: durable storage through sqlx
//!
//! # Example
//!
//! ```rust,no_run
//! use trade_journal::domain::repositories::TradeRepository;
//! use trade_journal::infrastructure::InMemoryTradeRepository;
//!
//! # async {
//! let repo = InMemoryTradeRepository::new();
//! let trades = repo.get_all().await?;
//! # anyhow::Ok(())
//! # };
//! ```

use crate::domain::journal::{Asset, Goal, JournalEntry, Portfolio, Trade};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for journaled trades
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// All trades, newest first
    async fn get_all(&self) -> Result<Vec<Trade>>;

    async fn get(&self, id: &str) -> Result<Option<Trade>>;

    async fn add(&self, trade: &Trade) -> Result<()>;

    /// Replace a stored trade. Fails with `JournalError::NotFound` for unknown ids.
    async fn update(&self, trade: &Trade) -> Result<()>;

    /// Store the exit of `trade` only if the stored copy is still open.
    /// Fails with `JournalError::TradeAlreadyClosed` when it is not.
    async fn close(&self, trade: &Trade) -> Result<()>;

    /// Fails with `JournalError::NotFound` for unknown ids.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Repository for goals
#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Goal>>;

    async fn get(&self, id: &str) -> Result<Option<Goal>>;

    async fn add(&self, goal: &Goal) -> Result<()>;

    async fn update(&self, goal: &Goal) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Repository for the portfolio snapshot
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Load the portfolio, falling back to defaults when nothing is stored
    async fn load(&self) -> Result<Portfolio>;

    async fn save(&self, portfolio: &Portfolio) -> Result<()>;
}

/// Repository for the asset catalogue
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// All assets, newest first
    async fn get_all(&self) -> Result<Vec<Asset>>;

    async fn get(&self, id: &str) -> Result<Option<Asset>>;

    async fn add(&self, asset: &Asset) -> Result<()>;

    async fn update(&self, asset: &Asset) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Repository for journal entries
#[async_trait]
pub trait JournalEntryRepository: Send + Sync {
    /// All entries, newest first
    async fn get_all(&self) -> Result<Vec<JournalEntry>>;

    async fn add(&self, entry: &JournalEntry) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

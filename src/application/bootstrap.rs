use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::application::journal_service::JournalService;
use crate::config::{Config, StorageBackend};
use crate::domain::events::LoggingListener;
use crate::domain::journal::Portfolio;
use crate::domain::repositories::{
    AssetRepository, GoalRepository, JournalEntryRepository, PortfolioRepository, TradeRepository,
};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::persistence::database::Database;
use crate::infrastructure::persistence::repositories::{
    SqliteAssetRepository, SqliteGoalRepository, SqliteJournalEntryRepository,
    SqlitePortfolioRepository, SqliteTradeRepository,
};
use crate::infrastructure::repositories::{
    InMemoryAssetRepository, InMemoryGoalRepository, InMemoryJournalEntryRepository,
    InMemoryPortfolioRepository, InMemoryTradeRepository,
};

/// One repository per record kind, all on the same backend.
pub struct PersistenceHandle {
    pub trade_repository: Arc<dyn TradeRepository>,
    pub goal_repository: Arc<dyn GoalRepository>,
    pub portfolio_repository: Arc<dyn PortfolioRepository>,
    pub asset_repository: Arc<dyn AssetRepository>,
    pub journal_entry_repository: Arc<dyn JournalEntryRepository>,
}

impl PersistenceHandle {
    pub fn in_memory(portfolio: Portfolio) -> Self {
        Self {
            trade_repository: Arc::new(InMemoryTradeRepository::new()),
            goal_repository: Arc::new(InMemoryGoalRepository::new()),
            portfolio_repository: Arc::new(InMemoryPortfolioRepository::new(portfolio)),
            asset_repository: Arc::new(InMemoryAssetRepository::new()),
            journal_entry_repository: Arc::new(InMemoryJournalEntryRepository::new()),
        }
    }

    /// `fallback` is returned as the portfolio until one has been saved.
    pub fn sqlite(db: Database, fallback: Portfolio) -> Self {
        Self {
            trade_repository: Arc::new(SqliteTradeRepository::new(db.clone())),
            goal_repository: Arc::new(SqliteGoalRepository::new(db.clone())),
            asset_repository: Arc::new(SqliteAssetRepository::new(db.clone())),
            journal_entry_repository: Arc::new(SqliteJournalEntryRepository::new(db.clone())),
            portfolio_repository: Arc::new(SqlitePortfolioRepository::new(db, fallback)),
        }
    }
}

pub struct PersistenceBootstrap;

impl PersistenceBootstrap {
    pub async fn init(config: &Config) -> Result<PersistenceHandle> {
        match config.storage_backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage; records are discarded on exit");
                Ok(PersistenceHandle::in_memory(config.default_portfolio()))
            }
            StorageBackend::Sqlite => {
                info!("Initializing Database at {}", config.database_url);
                let db = Database::new(&config.database_url)
                    .await
                    .context("Failed to initialize database")?;

                Ok(PersistenceHandle::sqlite(db, config.default_portfolio()))
            }
        }
    }
}

/// Wires storage, the event bus and the journal service from configuration.
pub async fn build_service(config: &Config) -> Result<JournalService> {
    let persistence = PersistenceBootstrap::init(config).await?;

    let event_bus = EventBus::new();
    event_bus.subscribe(Arc::new(LoggingListener)).await;

    Ok(JournalService::new(persistence, event_bus)
        .with_consistency_window(config.consistency_window_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config(backend: StorageBackend, database_url: &str) -> Config {
        Config {
            storage_backend: backend,
            database_url: database_url.to_string(),
            consistency_window_days: 14,
            recent_trades_limit: 5,
            currency: "GBP".to_string(),
            initial_capital: dec!(7500),
        }
    }

    #[tokio::test]
    async fn test_memory_backend_starts_from_configured_portfolio() {
        let service = build_service(&config(StorageBackend::Memory, ""))
            .await
            .unwrap();

        let portfolio = service.portfolio().await.unwrap();
        assert_eq!(portfolio.currency, "GBP");
        assert_eq!(portfolio.current_balance, dec!(7500));

        let today = chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(service.consistency(today, None).await.unwrap().len(), 14);
    }

    #[tokio::test]
    async fn test_sqlite_backend_uses_schema() {
        let service = build_service(&config(StorageBackend::Sqlite, "sqlite::memory:"))
            .await
            .unwrap();

        assert!(service.trades().await.unwrap().is_empty());
        assert!(service.goals().await.unwrap().is_empty());
        assert!(service.assets(&Default::default()).await.unwrap().is_empty());
        assert!(service.journal_entries().await.unwrap().is_empty());
        assert_eq!(
            service.portfolio().await.unwrap().initial_capital,
            dec!(7500)
        );
    }
}

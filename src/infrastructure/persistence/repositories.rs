pub mod asset_repository;
pub mod goal_repository;
pub mod journal_entry_repository;
pub mod portfolio_repository;
pub mod trade_repository;

pub use asset_repository::SqliteAssetRepository;
pub use goal_repository::SqliteGoalRepository;
pub use journal_entry_repository::SqliteJournalEntryRepository;
pub use portfolio_repository::SqlitePortfolioRepository;
pub use trade_repository::SqliteTradeRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::JournalError;
    use crate::domain::journal::{
        Asset, AssetCategory, Direction, EmotionalState, Goal, GoalCategory, GoalType,
        JournalEntry, Mood, Portfolio, Priority, Trade, Transaction, TransactionKind,
    };
    use crate::domain::repositories::{
        AssetRepository, GoalRepository, JournalEntryRepository, PortfolioRepository,
        TradeRepository,
    };
    use crate::infrastructure::persistence::database::Database;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    async fn memory_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    fn create_test_trade(asset: &str, created_ms: i64) -> Trade {
        let entered = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let mut trade = Trade::open(asset, Direction::Short, dec!(187.25), dec!(40), entered)
            .with_fees(dec!(1.20))
            .with_strategy("opening range");
        // Millisecond precision is what the table keeps
        trade.created_at = Utc.timestamp_millis_opt(created_ms).unwrap();
        trade
    }

    #[tokio::test]
    async fn test_trade_round_trip_preserves_optional_fields() {
        let repo = SqliteTradeRepository::new(memory_db().await);

        let mut trade = create_test_trade("AMD", 1_710_426_600_000);
        trade.tags = vec!["gap".to_string(), "earnings".to_string()];
        trade.notes = "faded the gap".to_string();
        trade.market_conditions = "risk-off open".to_string();
        trade.emotional_state = Some(EmotionalState::Confident);
        repo.add(&trade).await.unwrap();

        let loaded = repo.get(&trade.id).await.unwrap().unwrap();
        assert_eq!(loaded, trade);
        assert!(loaded.exit_price.is_none());
        assert!(loaded.pnl.is_none());
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trade_update_after_close() {
        let repo = SqliteTradeRepository::new(memory_db().await);

        let mut trade = create_test_trade("AMD", 1_710_426_600_000);
        repo.add(&trade).await.unwrap();

        let closed_at = trade.entered_at() + Duration::minutes(95);
        let pnl = trade.close(dec!(182.25), closed_at).unwrap();
        assert_eq!(pnl, dec!(198.80));
        repo.update(&trade).await.unwrap();

        let loaded = repo.get(&trade.id).await.unwrap().unwrap();
        assert!(loaded.is_closed());
        assert_eq!(loaded.pnl, Some(dec!(198.80)));
        assert_eq!(loaded.closed_at, Some(closed_at));
    }

    #[tokio::test]
    async fn test_trade_times_keep_sub_second_precision() {
        let repo = SqliteTradeRepository::new(memory_db().await);

        let entered = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_nano_opt(14, 30, 5, 123_456_789)
            .unwrap();
        let mut trade = Trade::open("MES", Direction::Long, dec!(5100), dec!(2), entered);
        trade.created_at = Utc.timestamp_millis_opt(1_710_426_605_123).unwrap();
        repo.add(&trade).await.unwrap();
        assert_eq!(repo.get(&trade.id).await.unwrap().unwrap().time, trade.time);

        trade
            .close(dec!(5104.25), entered + Duration::milliseconds(90_250))
            .unwrap();
        repo.close(&trade).await.unwrap();

        let loaded = repo.get(&trade.id).await.unwrap().unwrap();
        assert_eq!(loaded, trade);
    }

    #[tokio::test]
    async fn test_trade_close_is_guarded_by_stored_state() {
        let repo = SqliteTradeRepository::new(memory_db().await);
        let trade = create_test_trade("AMD", 1_710_426_600_000);
        repo.add(&trade).await.unwrap();

        let closed_at = trade.entered_at() + Duration::minutes(30);
        let mut winner = trade.clone();
        winner.close(dec!(180), closed_at).unwrap();
        let mut loser = trade.clone();
        loser.close(dec!(190), closed_at).unwrap();

        repo.close(&winner).await.unwrap();
        let err = repo.close(&loser).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::TradeAlreadyClosed { .. })
        ));
        assert_eq!(
            repo.get(&trade.id).await.unwrap().unwrap().exit_price,
            Some(dec!(180))
        );

        let mut unknown = create_test_trade("QQQ", 2_000);
        unknown.close(dec!(1), closed_at).unwrap();
        let err = repo.close(&unknown).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NotFound { kind: "Trade", .. })
        ));
    }

    #[tokio::test]
    async fn test_trades_listed_newest_first() {
        let repo = SqliteTradeRepository::new(memory_db().await);

        repo.add(&create_test_trade("OLD", 1_000)).await.unwrap();
        repo.add(&create_test_trade("NEW", 3_000)).await.unwrap();
        repo.add(&create_test_trade("MID", 2_000)).await.unwrap();

        let assets: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.asset)
            .collect();
        assert_eq!(assets, vec!["NEW", "MID", "OLD"]);
    }

    #[tokio::test]
    async fn test_trade_unknown_id_is_not_found() {
        let repo = SqliteTradeRepository::new(memory_db().await);
        let trade = create_test_trade("QQQ", 1_000);

        let err = repo.update(&trade).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NotFound { kind: "Trade", .. })
        ));

        repo.add(&trade).await.unwrap();
        repo.delete(&trade.id).await.unwrap();
        assert!(repo.delete(&trade.id).await.is_err());
    }

    #[tokio::test]
    async fn test_goal_crud() {
        let repo = SqliteGoalRepository::new(memory_db().await);

        let mut goal = Goal::new(
            GoalType::Monthly,
            GoalCategory::WinRate,
            60.0,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        goal.priority = Priority::High;
        goal.description = "Stay selective".to_string();
        repo.add(&goal).await.unwrap();

        assert_eq!(repo.get(&goal.id).await.unwrap().unwrap(), goal);

        goal.is_active = false;
        repo.update(&goal).await.unwrap();
        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_active);

        repo.delete(&goal.id).await.unwrap();
        assert!(repo.get(&goal.id).await.unwrap().is_none());
        assert!(repo.update(&goal).await.is_err());
    }

    #[tokio::test]
    async fn test_portfolio_defaults_then_persists() {
        let fallback = Portfolio::new("EUR", dec!(25000));
        let repo = SqlitePortfolioRepository::new(memory_db().await, fallback.clone());

        assert_eq!(repo.load().await.unwrap(), fallback);

        let mut portfolio = fallback;
        portfolio.apply_realized_pnl(dec!(-320.50));
        portfolio
            .record_transaction(Transaction::new(
                TransactionKind::Deposit,
                dec!(5000),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            ))
            .unwrap();
        repo.save(&portfolio).await.unwrap();
        // Second save exercises the upsert path
        repo.save(&portfolio).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, portfolio);
        assert_eq!(loaded.deposits.len(), 1);
    }

    #[tokio::test]
    async fn test_asset_crud() {
        let repo = SqliteAssetRepository::new(memory_db().await);

        let mut asset = Asset::new("gold", "Gold futures", AssetCategory::Commodities).unwrap();
        asset.exchange = Some("COMEX".to_string());
        asset.created_at = Utc.timestamp_millis_opt(1_000).unwrap();
        repo.add(&asset).await.unwrap();

        let mut newer = Asset::new("QQQ", "Nasdaq 100 ETF", AssetCategory::Indices).unwrap();
        newer.created_at = Utc.timestamp_millis_opt(2_000).unwrap();
        repo.add(&newer).await.unwrap();

        assert_eq!(repo.get(&asset.id).await.unwrap().unwrap(), asset);
        let symbols: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.symbol)
            .collect();
        assert_eq!(symbols, vec!["QQQ", "GOLD"]);

        asset.is_active = false;
        asset.sector = Some("Metals".to_string());
        repo.update(&asset).await.unwrap();
        assert_eq!(repo.get(&asset.id).await.unwrap().unwrap(), asset);

        repo.delete(&asset.id).await.unwrap();
        assert!(repo.get(&asset.id).await.unwrap().is_none());
        assert!(repo.delete(&asset.id).await.is_err());
    }

    #[tokio::test]
    async fn test_journal_entries_round_trip() {
        let repo = SqliteJournalEntryRepository::new(memory_db().await);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let mut older = JournalEntry::new(date, "Plan", "Only A+ setups today");
        older.created_at = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut newer = JournalEntry::new(date, "Review", "Chased the open again");
        newer.mood = Mood::Negative;
        newer.tags = vec!["discipline".to_string()];
        newer.created_at = Utc.timestamp_millis_opt(2_000).unwrap();

        repo.add(&older).await.unwrap();
        repo.add(&newer).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![newer, older.clone()]);

        repo.delete(&older.id).await.unwrap();
        let err = repo.delete(&older.id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NotFound {
                kind: "Journal entry",
                ..
            })
        ));
    }
}

use crate::application::bootstrap::PersistenceHandle;
use crate::domain::errors::JournalError;
use crate::domain::events::JournalEvent;
use crate::domain::journal::{Asset, AssetFilter, Goal, JournalEntry, Portfolio, Trade, Transaction};
use crate::domain::performance::consistency::DEFAULT_WINDOW_DAYS;
use crate::domain::performance::{
    Analytics, ConsistencyDay, GoalAnalytics, PnlPoint, consistency_series, pnl_curve,
};
use crate::domain::repositories::{
    AssetRepository, GoalRepository, JournalEntryRepository, PortfolioRepository, TradeRepository,
};
use crate::infrastructure::event_bus::EventBus;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Journal use cases over the configured repositories.
///
/// The portfolio balance tracks realized P&L: adding a closed trade, closing
/// one, editing a closed trade's result or deleting it all move the balance by
/// the change in that trade's contribution.
///
/// Every mutation runs under `write_lock`, so load-modify-save sequences on a
/// shared service never interleave.
pub struct JournalService {
    trade_repository: Arc<dyn TradeRepository>,
    goal_repository: Arc<dyn GoalRepository>,
    portfolio_repository: Arc<dyn PortfolioRepository>,
    asset_repository: Arc<dyn AssetRepository>,
    journal_entry_repository: Arc<dyn JournalEntryRepository>,
    event_bus: EventBus,
    consistency_window_days: u32,
    write_lock: Mutex<()>,
}

impl JournalService {
    pub fn new(persistence: PersistenceHandle, event_bus: EventBus) -> Self {
        Self {
            trade_repository: persistence.trade_repository,
            goal_repository: persistence.goal_repository,
            portfolio_repository: persistence.portfolio_repository,
            asset_repository: persistence.asset_repository,
            journal_entry_repository: persistence.journal_entry_repository,
            event_bus,
            consistency_window_days: DEFAULT_WINDOW_DAYS,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_consistency_window(mut self, days: u32) -> Self {
        self.consistency_window_days = days;
        self
    }

    // ===== Trades =====

    pub async fn add_trade(&self, mut trade: Trade) -> Result<Trade> {
        if trade.id.is_empty() {
            trade.id = uuid::Uuid::new_v4().to_string();
        }
        trade.created_at = Utc::now();

        let _guard = self.write_lock.lock().await;
        self.trade_repository.add(&trade).await?;
        info!(
            "Journaled {} {} x{} @ {}",
            trade.direction, trade.asset, trade.position_size, trade.entry_price
        );

        self.event_bus
            .publish(JournalEvent::TradeAdded {
                trade_id: trade.id.clone(),
                asset: trade.asset.clone(),
            })
            .await;

        self.adjust_balance(contribution(&trade)).await?;
        Ok(trade)
    }

    pub async fn close_trade(
        &self,
        id: &str,
        exit_price: Decimal,
        closed_at: NaiveDateTime,
    ) -> Result<Trade> {
        let _guard = self.write_lock.lock().await;
        let mut trade = self.require_trade(id).await?;
        let pnl = trade.close(exit_price, closed_at)?;
        self.trade_repository.close(&trade).await?;

        info!("Closed {} {} with P&L {}", trade.asset, trade.id, pnl);
        self.event_bus
            .publish(JournalEvent::TradeClosed {
                trade_id: trade.id.clone(),
                asset: trade.asset.clone(),
                pnl,
            })
            .await;

        self.adjust_balance(pnl).await?;
        Ok(trade)
    }

    pub async fn update_trade(&self, trade: Trade) -> Result<Trade> {
        let _guard = self.write_lock.lock().await;
        let previous = self.require_trade(&trade.id).await?;
        self.trade_repository.update(&trade).await?;

        self.event_bus
            .publish(JournalEvent::TradeUpdated {
                trade_id: trade.id.clone(),
            })
            .await;

        self.adjust_balance(contribution(&trade) - contribution(&previous))
            .await?;
        Ok(trade)
    }

    pub async fn delete_trade(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let trade = self.require_trade(id).await?;
        self.trade_repository.delete(id).await?;

        info!("Deleted trade {} ({})", trade.id, trade.asset);
        self.event_bus
            .publish(JournalEvent::TradeDeleted {
                trade_id: trade.id.clone(),
            })
            .await;

        self.adjust_balance(-contribution(&trade)).await?;
        Ok(())
    }

    pub async fn trades(&self) -> Result<Vec<Trade>> {
        self.trade_repository.get_all().await
    }

    /// Newest trades first, at most `limit`.
    pub async fn recent_trades(&self, limit: usize) -> Result<Vec<Trade>> {
        let mut trades = self.trade_repository.get_all().await?;
        trades.truncate(limit);
        Ok(trades)
    }

    // ===== Goals =====

    pub async fn add_goal(&self, goal: Goal) -> Result<Goal> {
        self.goal_repository.add(&goal).await?;
        info!(
            "Added {} {} goal targeting {}",
            goal.goal_type, goal.category, goal.target
        );

        self.event_bus
            .publish(JournalEvent::GoalAdded {
                goal_id: goal.id.clone(),
            })
            .await;
        Ok(goal)
    }

    /// Replaces every field of a stored goal.
    pub async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        let _guard = self.write_lock.lock().await;
        self.require_goal(&goal.id).await?;
        self.goal_repository.update(&goal).await?;
        debug!("Updated goal {}", goal.id);

        self.event_bus
            .publish(JournalEvent::GoalUpdated {
                goal_id: goal.id.clone(),
                is_active: goal.is_active,
            })
            .await;
        Ok(goal)
    }

    pub async fn set_goal_active(&self, id: &str, is_active: bool) -> Result<Goal> {
        let _guard = self.write_lock.lock().await;
        let mut goal = self.require_goal(id).await?;
        goal.is_active = is_active;
        self.goal_repository.update(&goal).await?;

        self.event_bus
            .publish(JournalEvent::GoalUpdated {
                goal_id: goal.id.clone(),
                is_active,
            })
            .await;
        Ok(goal)
    }

    pub async fn delete_goal(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.goal_repository.delete(id).await?;
        info!("Deleted goal {}", id);

        self.event_bus
            .publish(JournalEvent::GoalDeleted {
                goal_id: id.to_string(),
            })
            .await;
        Ok(())
    }

    pub async fn goals(&self) -> Result<Vec<Goal>> {
        self.goal_repository.get_all().await
    }

    // ===== Assets =====

    pub async fn add_asset(&self, asset: Asset) -> Result<Asset> {
        let asset = normalize_asset(asset)?;
        self.asset_repository.add(&asset).await?;
        info!("Added {} asset {}", asset.category, asset.symbol);

        self.event_bus
            .publish(JournalEvent::AssetAdded {
                asset_id: asset.id.clone(),
                symbol: asset.symbol.clone(),
            })
            .await;
        Ok(asset)
    }

    /// Replaces every field of a stored asset.
    pub async fn update_asset(&self, asset: Asset) -> Result<Asset> {
        let asset = normalize_asset(asset)?;
        let _guard = self.write_lock.lock().await;
        self.asset_repository.update(&asset).await?;

        self.event_bus
            .publish(JournalEvent::AssetUpdated {
                asset_id: asset.id.clone(),
                is_active: asset.is_active,
            })
            .await;
        Ok(asset)
    }

    /// Flips the favorite flag.
    pub async fn toggle_favorite(&self, id: &str) -> Result<Asset> {
        let _guard = self.write_lock.lock().await;
        let mut asset = self
            .asset_repository
            .get(id)
            .await?
            .ok_or_else(|| JournalError::asset_not_found(id))?;
        asset.is_active = !asset.is_active;
        self.asset_repository.update(&asset).await?;

        self.event_bus
            .publish(JournalEvent::AssetUpdated {
                asset_id: asset.id.clone(),
                is_active: asset.is_active,
            })
            .await;
        Ok(asset)
    }

    pub async fn delete_asset(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.asset_repository.delete(id).await?;

        self.event_bus
            .publish(JournalEvent::AssetDeleted {
                asset_id: id.to_string(),
            })
            .await;
        Ok(())
    }

    /// Catalogue entries matching `filter`, newest first.
    pub async fn assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
        let assets = self.asset_repository.get_all().await?;
        Ok(assets.into_iter().filter(|a| filter.matches(a)).collect())
    }

    // ===== Journal entries =====

    pub async fn add_journal_entry(&self, mut entry: JournalEntry) -> Result<JournalEntry> {
        if entry.id.is_empty() {
            entry.id = uuid::Uuid::new_v4().to_string();
        }
        entry.created_at = Utc::now();

        self.journal_entry_repository.add(&entry).await?;
        self.event_bus
            .publish(JournalEvent::JournalEntryAdded {
                entry_id: entry.id.clone(),
                date: entry.date,
            })
            .await;
        Ok(entry)
    }

    pub async fn delete_journal_entry(&self, id: &str) -> Result<()> {
        self.journal_entry_repository.delete(id).await?;
        self.event_bus
            .publish(JournalEvent::JournalEntryDeleted {
                entry_id: id.to_string(),
            })
            .await;
        Ok(())
    }

    /// Newest entries first.
    pub async fn journal_entries(&self) -> Result<Vec<JournalEntry>> {
        self.journal_entry_repository.get_all().await
    }

    // ===== Portfolio =====

    pub async fn portfolio(&self) -> Result<Portfolio> {
        self.portfolio_repository.load().await
    }

    pub async fn record_transaction(&self, transaction: Transaction) -> Result<Portfolio> {
        let _guard = self.write_lock.lock().await;
        let mut portfolio = self.portfolio_repository.load().await?;
        portfolio.record_transaction(transaction)?;
        self.portfolio_repository.save(&portfolio).await?;

        self.event_bus
            .publish(JournalEvent::PortfolioUpdated {
                balance: portfolio.current_balance,
            })
            .await;
        Ok(portfolio)
    }

    // ===== Analytics =====

    pub async fn analytics(&self, as_of: NaiveDateTime) -> Result<Analytics> {
        let trades = self.chronological_trades().await?;
        Ok(Analytics::calculate(&trades, as_of))
    }

    /// Calendar ending at `today`, over `days` or the configured window.
    pub async fn consistency(
        &self,
        today: NaiveDate,
        days: Option<u32>,
    ) -> Result<Vec<ConsistencyDay>> {
        let days = days.unwrap_or(self.consistency_window_days);
        let trades = self.trade_repository.get_all().await?;
        consistency_series(&trades, today, days)
            .with_context(|| format!("Cannot build a {}-day calendar ending {}", days, today))
    }

    pub async fn active_goal_analytics(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<(Goal, GoalAnalytics)>> {
        let trades = self.chronological_trades().await?;
        let portfolio = self.portfolio_repository.load().await?;
        let goals = self.goal_repository.get_all().await?;

        Ok(goals
            .into_iter()
            .filter(|g| g.is_active)
            .map(|goal| {
                let analytics = GoalAnalytics::calculate(&goal, &trades, &portfolio, today);
                (goal, analytics)
            })
            .collect())
    }

    pub async fn pnl_curve(&self) -> Result<Vec<PnlPoint>> {
        let trades = self.trade_repository.get_all().await?;
        Ok(pnl_curve(&trades))
    }

    /// Trades oldest first, the order drawdown scans assume.
    async fn chronological_trades(&self) -> Result<Vec<Trade>> {
        let mut trades = self.trade_repository.get_all().await?;
        // Stored newest first; reverse so equal entry times keep insertion order
        trades.reverse();
        trades.sort_by_key(|t| t.entered_at());
        Ok(trades)
    }

    async fn require_trade(&self, id: &str) -> Result<Trade> {
        self.trade_repository
            .get(id)
            .await?
            .ok_or_else(|| JournalError::trade_not_found(id).into())
    }

    async fn require_goal(&self, id: &str) -> Result<Goal> {
        self.goal_repository
            .get(id)
            .await?
            .ok_or_else(|| JournalError::goal_not_found(id).into())
    }

    /// Callers hold `write_lock`.
    async fn adjust_balance(&self, delta: Decimal) -> Result<()> {
        if delta.is_zero() {
            return Ok(());
        }

        let mut portfolio = self.portfolio_repository.load().await?;
        portfolio.apply_realized_pnl(delta);
        self.portfolio_repository.save(&portfolio).await?;
        debug!("Balance moved by {} to {}", delta, portfolio.current_balance);

        self.event_bus
            .publish(JournalEvent::PortfolioUpdated {
                balance: portfolio.current_balance,
            })
            .await;
        Ok(())
    }
}

/// Realized P&L a trade adds to the balance.
fn contribution(trade: &Trade) -> Decimal {
    if trade.is_closed() {
        trade.effective_pnl()
    } else {
        Decimal::ZERO
    }
}

/// Same rules as `Asset::new`: non-blank symbol and name, upper-case symbol.
fn normalize_asset(mut asset: Asset) -> Result<Asset, JournalError> {
    asset.symbol = asset.symbol.trim().to_uppercase();
    asset.name = asset.name.trim().to_string();
    if asset.symbol.is_empty() || asset.name.is_empty() {
        return Err(JournalError::MissingAssetFields);
    }
    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::{
        AssetCategory, Direction, GoalCategory, GoalType, Mood, Priority, TransactionKind,
    };
    use crate::infrastructure::event_bus::tests::RecordingListener;
    use rust_decimal_macros::dec;

    fn at(date: &str, hour: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    async fn service() -> (JournalService, Arc<RecordingListener>) {
        let bus = EventBus::new();
        let recorder = Arc::new(RecordingListener::default());
        bus.subscribe(recorder.clone()).await;

        let service = JournalService::new(
            PersistenceHandle::in_memory(Portfolio::new("USD", dec!(10000))),
            bus,
        );
        (service, recorder)
    }

    #[tokio::test]
    async fn test_close_trade_books_pnl_and_publishes() {
        let (service, recorder) = service().await;

        let trade = service
            .add_trade(Trade::open(
                "MSFT",
                Direction::Long,
                dec!(410),
                dec!(20),
                at("2024-05-06", 10),
            ))
            .await
            .unwrap();
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10000)
        );

        let closed = service
            .close_trade(&trade.id, dec!(415.5), at("2024-05-06", 15))
            .await
            .unwrap();
        assert_eq!(closed.pnl, Some(dec!(110)));
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10110)
        );

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], JournalEvent::TradeAdded { .. }));
        assert!(matches!(events[1], JournalEvent::TradeClosed { pnl, .. } if pnl == dec!(110)));
        assert!(matches!(events[2], JournalEvent::PortfolioUpdated { balance } if balance == dec!(10110)));
    }

    #[tokio::test]
    async fn test_close_trade_twice_is_rejected() {
        let (service, _) = service().await;
        let trade = service
            .add_trade(Trade::open(
                "ES",
                Direction::Short,
                dec!(5200),
                dec!(1),
                at("2024-05-06", 9),
            ))
            .await
            .unwrap();

        service
            .close_trade(&trade.id, dec!(5190), at("2024-05-06", 11))
            .await
            .unwrap();
        let err = service
            .close_trade(&trade.id, dec!(5180), at("2024-05-06", 12))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::TradeAlreadyClosed { .. })
        ));
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10010)
        );
    }

    #[tokio::test]
    async fn test_unknown_trade_is_not_found() {
        let (service, _) = service().await;
        let err = service
            .close_trade("nope", dec!(1), at("2024-05-06", 9))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NotFound { kind: "Trade", .. })
        ));
        assert!(service.delete_trade("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_edit_and_delete_keep_balance_in_step() {
        let (service, _) = service().await;

        let mut trade = Trade::open("GC", Direction::Long, dec!(2300), dec!(1), at("2024-05-07", 9));
        trade.close(dec!(2350), at("2024-05-07", 10)).unwrap();
        let trade = service.add_trade(trade).await.unwrap();
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10050)
        );

        let mut edited = trade.clone();
        edited.pnl = Some(dec!(30));
        service.update_trade(edited).await.unwrap();
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10030)
        );

        service.delete_trade(&trade.id).await.unwrap();
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10000)
        );
        assert!(service.trades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_trades_newest_first() {
        let (service, _) = service().await;
        for asset in ["A", "B", "C"] {
            service
                .add_trade(Trade::open(asset, Direction::Long, dec!(1), dec!(1), at("2024-05-08", 9)))
                .await
                .unwrap();
        }

        let recent = service.recent_trades(2).await.unwrap();
        let assets: Vec<&str> = recent.iter().map(|t| t.asset.as_str()).collect();
        assert_eq!(assets, vec!["C", "B"]);
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_non_positive() {
        let (service, _) = service().await;
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let portfolio = service
            .record_transaction(Transaction::new(TransactionKind::Withdrawal, dec!(750), date))
            .await
            .unwrap();
        assert_eq!(portfolio.current_balance, dec!(9250));

        let err = service
            .record_transaction(Transaction::new(TransactionKind::Deposit, dec!(0), date))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::InvalidAmount { .. })
        ));
    }

    #[tokio::test]
    async fn test_only_active_goals_are_analyzed() {
        let (service, recorder) = service().await;
        let created = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let deadline = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();

        let kept = service
            .add_goal(Goal::new(GoalType::Monthly, GoalCategory::Trades, 20.0, created, deadline))
            .await
            .unwrap();
        let paused = service
            .add_goal(Goal::new(GoalType::Monthly, GoalCategory::Profit, 1000.0, created, deadline))
            .await
            .unwrap();
        service.set_goal_active(&paused.id, false).await.unwrap();

        service
            .add_trade(Trade::open("NQ", Direction::Long, dec!(1), dec!(1), at("2024-05-09", 9)))
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let analyzed = service.active_goal_analytics(today).await.unwrap();
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].0.id, kept.id);
        assert_eq!(analyzed[0].1.current, 1.0);
        assert!(
            recorder
                .events
                .lock()
                .unwrap()
                .contains(&JournalEvent::GoalUpdated {
                    goal_id: paused.id.clone(),
                    is_active: false,
                })
        );
    }

    #[tokio::test]
    async fn test_consistency_uses_configured_window() {
        let (service, _) = service().await;
        let service = service.with_consistency_window(7);

        let mut trade = Trade::open("CL", Direction::Long, dec!(80), dec!(10), at("2024-05-10", 9));
        trade.close(dec!(81), at("2024-05-10", 12)).unwrap();
        service.add_trade(trade).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let days = service.consistency(today, None).await.unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6].date, today);
        assert_eq!(days[4].pnl, dec!(10));
        assert_eq!(days[4].trades, 1);

        let curve = service.pnl_curve().await.unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].cumulative, dec!(10));

        let analytics = service.analytics(at("2024-05-12", 0)).await.unwrap();
        assert_eq!(analytics.total_trades, 1);
        assert_eq!(analytics.win_rate, 100.0);
    }

    #[tokio::test]
    async fn test_consistency_window_override_and_limit() {
        let (service, _) = service().await;
        let today = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();

        assert_eq!(service.consistency(today, Some(30)).await.unwrap().len(), 30);

        let err = service
            .consistency(today, Some(200_000_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::InvalidWindow { .. })
        ));
        assert!(format!("{:#}", err).contains("200000000-day calendar"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_trades_all_reach_the_balance() {
        let (service, _) = service().await;
        let service = Arc::new(service);

        let mut handles = vec![];
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let mut trade = Trade::open(
                    format!("SYM{}", i),
                    Direction::Long,
                    dec!(100),
                    dec!(1),
                    at("2024-05-13", 10),
                );
                trade.close(dec!(110), at("2024-05-13", 11)).unwrap();
                service.add_trade(trade).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.trades().await.unwrap().len(), 20);
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10200)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_closes_book_pnl_once() {
        let (service, recorder) = service().await;
        let service = Arc::new(service);
        let trade = service
            .add_trade(Trade::open(
                "RTY",
                Direction::Long,
                dec!(2000),
                dec!(1),
                at("2024-05-14", 9),
            ))
            .await
            .unwrap();

        let mut handles = vec![];
        for exit in [dec!(2025), dec!(2050)] {
            let service = service.clone();
            let id = trade.id.clone();
            handles.push(tokio::spawn(async move {
                service.close_trade(&id, exit, at("2024-05-14", 12)).await
            }));
        }
        let mut succeeded = vec![];
        for handle in handles {
            if let Ok(closed) = handle.await.unwrap() {
                succeeded.push(closed);
            }
        }

        assert_eq!(succeeded.len(), 1);
        let pnl = succeeded[0].effective_pnl();
        assert_eq!(
            service.portfolio().await.unwrap().current_balance,
            dec!(10000) + pnl
        );
        let closes = recorder
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, JournalEvent::TradeClosed { .. }))
            .count();
        assert_eq!(closes, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_goal() {
        let (service, recorder) = service().await;
        let created = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let goal = service
            .add_goal(Goal::new(
                GoalType::Weekly,
                GoalCategory::WinRate,
                55.0,
                created,
                NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            ))
            .await
            .unwrap();

        let mut edited = goal.clone();
        edited.goal_type = GoalType::Monthly;
        edited.target = 60.0;
        edited.deadline = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        edited.priority = Priority::High;
        edited.description = "Be picky".to_string();
        service.update_goal(edited.clone()).await.unwrap();
        assert_eq!(service.goals().await.unwrap(), vec![edited]);

        service.delete_goal(&goal.id).await.unwrap();
        assert!(service.goals().await.unwrap().is_empty());

        let err = service.update_goal(goal.clone()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::NotFound { kind: "Goal", .. })
        ));
        assert!(service.delete_goal(&goal.id).await.is_err());
        assert!(
            recorder
                .events
                .lock()
                .unwrap()
                .contains(&JournalEvent::GoalDeleted {
                    goal_id: goal.id.clone()
                })
        );
    }

    #[tokio::test]
    async fn test_asset_catalogue() {
        let (service, _) = service().await;

        let apple = service
            .add_asset(Asset::new("aapl", "Apple", AssetCategory::Stocks).unwrap())
            .await
            .unwrap();
        assert_eq!(apple.symbol, "AAPL");
        service
            .add_asset(Asset::new("BTC", "Bitcoin", AssetCategory::Crypto).unwrap())
            .await
            .unwrap();

        let unstarred = service.toggle_favorite(&apple.id).await.unwrap();
        assert!(!unstarred.is_active);

        let favorites = AssetFilter {
            favorites_only: true,
            ..Default::default()
        };
        let symbols: Vec<String> = service
            .assets(&favorites)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.symbol)
            .collect();
        assert_eq!(symbols, vec!["BTC"]);

        let mut renamed = unstarred.clone();
        renamed.name = "Apple Inc.".to_string();
        renamed.exchange = Some("NASDAQ".to_string());
        service.update_asset(renamed).await.unwrap();

        let stocks = AssetFilter {
            category: Some(AssetCategory::Stocks),
            ..Default::default()
        };
        let listed = service.assets(&stocks).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Apple Inc.");

        let mut blank = listed[0].clone();
        blank.symbol = " ".to_string();
        let err = service.update_asset(blank).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JournalError>(),
            Some(JournalError::MissingAssetFields)
        ));

        service.delete_asset(&apple.id).await.unwrap();
        assert_eq!(service.assets(&AssetFilter::default()).await.unwrap().len(), 1);
        assert!(service.toggle_favorite(&apple.id).await.is_err());
    }

    #[tokio::test]
    async fn test_journal_entries() {
        let (service, recorder) = service().await;
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();

        let mut entry = JournalEntry::new(date, "FOMC day", "Sat on hands until 2pm");
        entry.id = String::new();
        entry.mood = Mood::Positive;
        let stored = service.add_journal_entry(entry).await.unwrap();
        assert!(!stored.id.is_empty());

        service
            .add_journal_entry(JournalEntry::new(date, "After close", "Good discipline"))
            .await
            .unwrap();

        let entries = service.journal_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], stored);

        service.delete_journal_entry(&stored.id).await.unwrap();
        assert_eq!(service.journal_entries().await.unwrap().len(), 1);
        assert!(
            recorder
                .events
                .lock()
                .unwrap()
                .contains(&JournalEvent::JournalEntryAdded {
                    entry_id: stored.id.clone(),
                    date,
                })
        );
    }
}

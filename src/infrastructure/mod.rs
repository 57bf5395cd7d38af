pub mod event_bus;
pub mod persistence;
pub mod repositories;

pub use event_bus::EventBus;
pub use repositories::{
    InMemoryAssetRepository, InMemoryGoalRepository, InMemoryJournalEntryRepository,
    InMemoryPortfolioRepository, InMemoryTradeRepository,
};

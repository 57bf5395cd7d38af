pub mod in_memory;

pub use in_memory::{
    InMemoryAssetRepository, InMemoryGoalRepository, InMemoryJournalEntryRepository,
    InMemoryPortfolioRepository, InMemoryTradeRepository,
};

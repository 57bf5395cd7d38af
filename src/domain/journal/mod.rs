// Journal records: trades, goals, the account they belong to and the notes around them
pub mod asset;
pub mod entry;
pub mod goal;
pub mod portfolio;
pub mod trade;

pub use asset::{Asset, AssetCategory, AssetFilter};
pub use entry::{JournalEntry, Mood};
pub use goal::{Goal, GoalCategory, GoalType, Priority};
pub use portfolio::{Portfolio, PortfolioSummary, Transaction, TransactionKind};
pub use trade::{Direction, EmotionalState, Trade};

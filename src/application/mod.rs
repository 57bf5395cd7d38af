pub mod bootstrap;
pub mod journal_service;
pub mod reporting;

pub use bootstrap::{PersistenceHandle, build_service};
pub use journal_service::JournalService;
pub use reporting::JournalReporter;

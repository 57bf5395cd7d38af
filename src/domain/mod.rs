// Journal records
pub mod journal;

// Analytics engine
pub mod performance;

// Repository traits
pub mod repositories;

// Typed journal events
pub mod events;

// Domain-specific error types
pub mod errors;

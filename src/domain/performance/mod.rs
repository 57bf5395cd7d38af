// Journal analytics engine: pure functions over trade and goal records
pub mod calculator;
pub mod consistency;
pub mod goal_analytics;
pub mod metrics;
pub mod pnl_curve;
pub mod stats;

pub use calculator::realized_pnl;
pub use consistency::{
    ConsistencyDay, ConsistencySummary, calendar_weeks, consistency_series, consistency_summary,
};
pub use goal_analytics::{GoalAnalytics, PerformanceRating};
pub use metrics::Analytics;
pub use pnl_curve::{PnlPoint, pnl_curve};

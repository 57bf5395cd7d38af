//! Live progress of a goal against the trades of its current period.
//!
//! The contributing trades come from the *current* instance of the goal's
//! period (today, this week, this month, this year), while the time accounting
//! spans the goal's whole creation-to-deadline range.

use super::calculator::max_drawdown;
use crate::domain::journal::{Goal, GoalCategory, Portfolio, Trade};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Average,
    Poor,
    Bad,
}

impl PerformanceRating {
    /// Rates progress against the share of time already elapsed.
    pub fn from_pace(pace_ratio: f64, growth_rate: f64) -> Self {
        if pace_ratio >= 1.5 && growth_rate > 20.0 {
            PerformanceRating::Excellent
        } else if pace_ratio >= 1.2 && growth_rate > 10.0 {
            PerformanceRating::Good
        } else if pace_ratio >= 0.8 {
            PerformanceRating::Average
        } else if pace_ratio >= 0.5 {
            PerformanceRating::Poor
        } else {
            PerformanceRating::Bad
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Outstanding progress, well ahead of schedule",
            PerformanceRating::Good => "Solid progress, ahead of schedule",
            PerformanceRating::Average => "On track with the expected pace",
            PerformanceRating::Poor => "Falling behind the expected pace",
            PerformanceRating::Bad => "Significantly behind schedule",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceRating::Excellent => "excellent",
            PerformanceRating::Good => "good",
            PerformanceRating::Average => "average",
            PerformanceRating::Poor => "poor",
            PerformanceRating::Bad => "bad",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAnalytics {
    pub current: f64,
    /// Percent of target reached. Inverted for drawdown goals.
    pub progress: f64,
    pub remaining: f64,
    pub days_remaining: i64,
    /// Share of the creation-to-deadline span already elapsed, 0..=1.
    pub time_progress: f64,
    pub growth_rate: f64,
    pub average_growth: f64,
    pub required_daily_progress: f64,
    pub performance_rating: PerformanceRating,
    pub achievement_probability: f64,
    pub insights: Vec<String>,
}

impl GoalAnalytics {
    pub fn calculate(goal: &Goal, trades: &[Trade], portfolio: &Portfolio, today: NaiveDate) -> Self {
        let (start, end) = goal.goal_type.current_window(today);
        let window: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect();
        let closed: Vec<&Trade> = window.iter().copied().filter(|t| t.is_closed()).collect();

        let window_win_rate = if closed.is_empty() {
            None
        } else {
            let wins = closed
                .iter()
                .filter(|t| t.effective_pnl() > Decimal::ZERO)
                .count();
            Some(wins as f64 / closed.len() as f64 * 100.0)
        };

        let current = match goal.category {
            GoalCategory::Profit => closed
                .iter()
                .map(|t| t.effective_pnl())
                .sum::<Decimal>()
                .to_f64()
                .unwrap_or(0.0),
            GoalCategory::WinRate => window_win_rate.unwrap_or(0.0),
            GoalCategory::Trades => window.len() as f64,
            GoalCategory::Drawdown => max_drawdown(closed.iter().copied()).to_f64().unwrap_or(0.0),
        };

        let target = goal.target;
        let progress = Self::progress(goal.category, current, target);
        let remaining = (target - current).max(0.0);

        // Time accounting over the full goal span
        let total_days = (goal.deadline - goal.created_at).num_days();
        let elapsed_days = (today - goal.created_at).num_days();
        let days_remaining = (goal.deadline - today).num_days().max(0);
        let time_progress = if total_days > 0 {
            (elapsed_days as f64 / total_days as f64).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let expected_progress = time_progress * target;
        let achieved = progress / 100.0 * target;
        let growth_rate = if expected_progress != 0.0 {
            (achieved - expected_progress) / expected_progress * 100.0
        } else {
            0.0
        };

        let average_growth = if elapsed_days > 0 {
            current / elapsed_days as f64
        } else {
            0.0
        };
        let required_daily_progress = if days_remaining > 0 {
            remaining / days_remaining as f64
        } else {
            0.0
        };

        let expected_pct = time_progress * 100.0;
        let pace_ratio = if expected_pct > 0.0 {
            progress / expected_pct
        } else {
            1.0
        };

        let performance_rating = PerformanceRating::from_pace(pace_ratio, growth_rate);
        let achievement_probability = Self::achievement_probability(
            goal.category,
            current,
            progress,
            pace_ratio,
            growth_rate,
            days_remaining,
        );

        let planned_daily_pace = if total_days > 0 {
            target / total_days as f64
        } else {
            0.0
        };
        let insights = Self::insights(&InsightInputs {
            category: goal.category,
            currency: &portfolio.currency,
            progress,
            time_progress,
            pace_ratio,
            growth_rate,
            days_remaining,
            remaining,
            required_daily_progress,
            planned_daily_pace,
            window_win_rate,
        });

        Self {
            current,
            progress,
            remaining,
            days_remaining,
            time_progress,
            growth_rate,
            average_growth,
            required_daily_progress,
            performance_rating,
            achievement_probability,
            insights,
        }
    }

    /// Percent of target reached; drawdown goals count down from 100.
    pub fn progress(category: GoalCategory, current: f64, target: f64) -> f64 {
        if target <= 0.0 {
            return 0.0;
        }
        match category {
            GoalCategory::Drawdown => ((1.0 - current / target) * 100.0).max(0.0),
            _ => current / target * 100.0,
        }
    }

    fn achievement_probability(
        category: GoalCategory,
        current: f64,
        progress: f64,
        pace_ratio: f64,
        growth_rate: f64,
        days_remaining: i64,
    ) -> f64 {
        let mut probability: f64 = 50.0;

        probability += if pace_ratio >= 1.5 {
            25.0
        } else if pace_ratio >= 1.2 {
            15.0
        } else if pace_ratio >= 1.0 {
            10.0
        } else if pace_ratio >= 0.8 {
            0.0
        } else if pace_ratio >= 0.5 {
            -15.0
        } else {
            -25.0
        };

        probability += if growth_rate > 20.0 {
            10.0
        } else if growth_rate > 10.0 {
            5.0
        } else if growth_rate >= -10.0 {
            0.0
        } else if growth_rate >= -20.0 {
            -5.0
        } else {
            -10.0
        };

        // Time pressure only matters while the target is unmet
        if progress < 100.0 {
            probability += if days_remaining == 0 {
                -20.0
            } else if days_remaining <= 7 {
                -10.0
            } else if days_remaining > 30 {
                5.0
            } else {
                0.0
            };
        }

        match category {
            GoalCategory::WinRate if current > 70.0 => probability += 10.0,
            GoalCategory::Profit if growth_rate > 15.0 => probability += 10.0,
            _ => {}
        }

        probability.clamp(0.0, 100.0)
    }

    fn insights(inputs: &InsightInputs<'_>) -> Vec<String> {
        let mut insights = Vec::new();

        if inputs.pace_ratio > 1.2 {
            insights.push(format!(
                "Ahead of schedule: {:.1}% complete with {:.0}% of the time elapsed.",
                inputs.progress,
                inputs.time_progress * 100.0
            ));
        }

        if inputs.growth_rate < 0.0 && inputs.days_remaining > 0 {
            insights.push(format!(
                "Progress is {:.1}% behind the expected pace with {} days left to recover.",
                inputs.growth_rate.abs(),
                inputs.days_remaining
            ));
        }

        if inputs.days_remaining < 7 && inputs.progress < 80.0 {
            insights.push(format!(
                "Less than a week left and only {:.1}% complete. Focus on high-quality setups.",
                inputs.progress
            ));
        }

        if inputs.remaining > 0.0
            && inputs.planned_daily_pace > 0.0
            && inputs.required_daily_progress > inputs.planned_daily_pace
        {
            insights.push(format!(
                "Daily target increased to {} per day (planned {}).",
                inputs.amount(inputs.required_daily_progress),
                inputs.amount(inputs.planned_daily_pace)
            ));
        }

        if inputs.progress > 90.0 {
            insights.push("Over 90% complete. Stay consistent to close it out.".to_string());
        }

        if let Some(win_rate) = inputs.window_win_rate
            && win_rate < 50.0
        {
            insights.push(format!(
                "Win rate this period is {:.1}%, below 50%. Review losing trades before adding size.",
                win_rate
            ));
        }

        insights
    }
}

struct InsightInputs<'a> {
    category: GoalCategory,
    currency: &'a str,
    progress: f64,
    time_progress: f64,
    pace_ratio: f64,
    growth_rate: f64,
    days_remaining: i64,
    remaining: f64,
    required_daily_progress: f64,
    planned_daily_pace: f64,
    window_win_rate: Option<f64>,
}

impl InsightInputs<'_> {
    fn amount(&self, value: f64) -> String {
        match self.category {
            GoalCategory::Profit | GoalCategory::Drawdown => {
                format!("{:.2} {}", value, self.currency)
            }
            GoalCategory::WinRate => format!("{:.1}%", value),
            GoalCategory::Trades => format!("{:.1} trades", value),
        }
    }
}

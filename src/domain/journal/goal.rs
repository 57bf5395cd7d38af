use crate::domain::errors::JournalError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rolling period a goal is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl GoalType {
    /// Inclusive `(start, end)` bounds of the period instance containing `today`.
    /// Weeks start on Sunday.
    pub fn current_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            GoalType::Daily => (today, today),
            GoalType::Weekly => {
                let start =
                    today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                (start, start + Duration::days(6))
            }
            GoalType::Monthly => {
                let start = today.with_day(1).unwrap_or(today);
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let end = next_month
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(today);
                (start, end)
            }
            GoalType::Yearly => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (start, end)
            }
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalType::Daily => write!(f, "daily"),
            GoalType::Weekly => write!(f, "weekly"),
            GoalType::Monthly => write!(f, "monthly"),
            GoalType::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for GoalType {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(GoalType::Daily),
            "weekly" => Ok(GoalType::Weekly),
            "monthly" => Ok(GoalType::Monthly),
            "yearly" => Ok(GoalType::Yearly),
            _ => Err(JournalError::InvalidGoalType {
                value: s.to_string(),
            }),
        }
    }
}

/// Metric a goal tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Profit,
    WinRate,
    Trades,
    Drawdown,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalCategory::Profit => write!(f, "profit"),
            GoalCategory::WinRate => write!(f, "winrate"),
            GoalCategory::Trades => write!(f, "trades"),
            GoalCategory::Drawdown => write!(f, "drawdown"),
        }
    }
}

impl FromStr for GoalCategory {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profit" => Ok(GoalCategory::Profit),
            "winrate" | "win_rate" => Ok(GoalCategory::WinRate),
            "trades" => Ok(GoalCategory::Trades),
            "drawdown" => Ok(GoalCategory::Drawdown),
            _ => Err(JournalError::InvalidGoalCategory {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl FromStr for Priority {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(JournalError::InvalidPriority {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub goal_type: GoalType,
    pub category: GoalCategory,
    pub target: f64,
    pub created_at: NaiveDate,
    pub deadline: NaiveDate,
    pub description: String,
    pub is_active: bool,
    pub priority: Priority,
}

impl Goal {
    pub fn new(
        goal_type: GoalType,
        category: GoalCategory,
        target: f64,
        created_at: NaiveDate,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            goal_type,
            category,
            target,
            created_at,
            deadline,
            description: String::new(),
            is_active: true,
            priority: Priority::default(),
        }
    }
}

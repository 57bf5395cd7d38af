use crate::domain::errors::JournalError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Positive => write!(f, "positive"),
            Mood::Negative => write!(f, "negative"),
            Mood::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for Mood {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Mood::Positive),
            "negative" => Ok(Mood::Negative),
            "neutral" => Ok(Mood::Neutral),
            _ => Err(JournalError::InvalidMood {
                value: s.to_string(),
            }),
        }
    }
}

/// Free-form diary note for a trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title: title.into(),
            content: content.into(),
            mood: Mood::default(),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

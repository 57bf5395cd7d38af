use crate::domain::errors::JournalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Stocks,
    Crypto,
    Forex,
    Commodities,
    Indices,
    Options,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Stocks => write!(f, "stocks"),
            AssetCategory::Crypto => write!(f, "crypto"),
            AssetCategory::Forex => write!(f, "forex"),
            AssetCategory::Commodities => write!(f, "commodities"),
            AssetCategory::Indices => write!(f, "indices"),
            AssetCategory::Options => write!(f, "options"),
        }
    }
}

impl FromStr for AssetCategory {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stocks" | "stock" => Ok(AssetCategory::Stocks),
            "crypto" => Ok(AssetCategory::Crypto),
            "forex" => Ok(AssetCategory::Forex),
            "commodities" | "commodity" => Ok(AssetCategory::Commodities),
            "indices" | "index" => Ok(AssetCategory::Indices),
            "options" | "option" => Ok(AssetCategory::Options),
            _ => Err(JournalError::InvalidAssetCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// An instrument in the user's watch catalogue.
///
/// `is_active` doubles as the favorite flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    /// Always upper case
    pub symbol: String,
    pub name: String,
    pub category: AssetCategory,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    /// Creates a favorited asset. Symbol and name must be non-blank.
    pub fn new(
        symbol: &str,
        name: &str,
        category: AssetCategory,
    ) -> Result<Self, JournalError> {
        let symbol = symbol.trim();
        let name = name.trim();
        if symbol.is_empty() || name.is_empty() {
            return Err(JournalError::MissingAssetFields);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            category,
            exchange: None,
            sector: None,
            is_active: true,
            created_at: Utc::now(),
        })
    }
}

/// Catalogue query: every set criterion must match.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    /// Case-insensitive substring of the symbol or the name
    pub search: Option<String>,
    pub category: Option<AssetCategory>,
    pub favorites_only: bool,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                asset.symbol.to_lowercase().contains(&term)
                    || asset.name.to_lowercase().contains(&term)
            }
            None => true,
        };
        let matches_category = self.category.is_none_or(|c| c == asset.category);

        matches_search && matches_category && (!self.favorites_only || asset.is_active)
    }
}

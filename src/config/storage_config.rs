//! Storage configuration parsing from environment variables.

use anyhow::Result;
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/journal.db";

/// Where journal records live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => anyhow::bail!("Invalid STORAGE_BACKEND: {}. Must be 'memory' or 'sqlite'", s),
        }
    }
}

/// Storage environment configuration
#[derive(Debug, Clone)]
pub struct StorageEnvConfig {
    pub backend: StorageBackend,
    pub database_url: String,
}

impl StorageEnvConfig {
    pub fn from_env() -> Result<Self> {
        let backend_str = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "sqlite".to_string());

        Ok(Self {
            backend: StorageBackend::from_str(&backend_str)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        })
    }
}

use anyhow::{Context, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// Shared SQLite pool with the journal schema applied
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        // Ensure the directory exists if it's a file path
        if let Some(path_part) = db_url.strip_prefix("sqlite://") {
            let path = Path::new(path_part);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create database directory")?;
            }
        }

        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        // In-memory databases live per connection, so keep a single one
        let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        info!("Connected to database: {}", db_url);

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        // 1. Trades
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trades (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                asset TEXT NOT NULL,
                direction TEXT NOT NULL,
                entry_price TEXT NOT NULL,
                exit_price TEXT,
                position_size TEXT NOT NULL,
                fees TEXT,
                is_open BOOLEAN NOT NULL DEFAULT 1,
                pnl TEXT,
                closed_at TEXT,
                strategy TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                market_conditions TEXT NOT NULL DEFAULT '',
                emotional_state TEXT,
                tags_json TEXT NOT NULL DEFAULT '[]',
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create trades table")?;

        // Journals created before these columns existed; "duplicate column" errors are expected
        let _ = sqlx::query(
            "ALTER TABLE trades ADD COLUMN market_conditions TEXT NOT NULL DEFAULT ''",
        )
        .execute(&mut *conn)
        .await;
        let _ = sqlx::query("ALTER TABLE trades ADD COLUMN emotional_state TEXT")
            .execute(&mut *conn)
            .await;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_trades_date
            ON trades (date);
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create trade date index")?;

        // 2. Goals
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                goal_type TEXT NOT NULL,
                category TEXT NOT NULL,
                target REAL NOT NULL,
                created_at TEXT NOT NULL,
                deadline TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                priority TEXT NOT NULL DEFAULT 'medium'
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create goals table")?;

        // 3. Portfolio (singleton row, settings stored as JSON)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS portfolio (
                id TEXT PRIMARY KEY,
                portfolio_json TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create portfolio table")?;

        // 4. Asset catalogue
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS assets (
                id TEXT PRIMARY KEY,
                symbol TEXT NOT NULL,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                exchange TEXT,
                sector TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create assets table")?;

        // 5. Journal entries
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                mood TEXT NOT NULL DEFAULT 'neutral',
                tags_json TEXT NOT NULL DEFAULT '[]',
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create journal_entries table")?;

        info!("Database schema initialized.");
        Ok(())
    }
}

use crate::domain::journal::Portfolio;
use crate::domain::repositories::PortfolioRepository;
use crate::infrastructure::persistence::database::Database;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

const PORTFOLIO_ID: &str = "default";

/// Stores the portfolio as a single JSON row. Falls back to `fallback`
/// until the first save.
pub struct SqlitePortfolioRepository {
    database: Database,
    fallback: Portfolio,
}

impl SqlitePortfolioRepository {
    pub fn new(database: Database, fallback: Portfolio) -> Self {
        Self { database, fallback }
    }
}

#[async_trait]
impl PortfolioRepository for SqlitePortfolioRepository {
    async fn load(&self) -> Result<Portfolio> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT portfolio_json FROM portfolio WHERE id = $1",
        )
        .bind(PORTFOLIO_ID)
        .fetch_optional(&self.database.pool)
        .await
        .context("Failed to load portfolio")?;

        match row {
            Some((json,)) => {
                serde_json::from_str(&json).context("Failed to deserialize portfolio")
            }
            None => {
                debug!("No stored portfolio, using defaults");
                Ok(self.fallback.clone())
            }
        }
    }

    async fn save(&self, portfolio: &Portfolio) -> Result<()> {
        let json = serde_json::to_string(portfolio).context("Failed to serialize portfolio")?;

        sqlx::query(
            r#"
            INSERT INTO portfolio (id, portfolio_json, updated_at)
            VALUES ($1, $2, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                portfolio_json = excluded.portfolio_json,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(PORTFOLIO_ID)
        .bind(json)
        .execute(&self.database.pool)
        .await
        .context("Failed to save portfolio")?;

        Ok(())
    }
}

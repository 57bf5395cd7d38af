use crate::domain::errors::JournalError;
use crate::domain::journal::{Asset, AssetCategory};
use crate::domain::repositories::AssetRepository;
use crate::infrastructure::persistence::database::Database;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::Row;
use std::str::FromStr;

pub struct SqliteAssetRepository {
    database: Database,
}

impl SqliteAssetRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AssetRepository for SqliteAssetRepository {
    async fn get_all(&self) -> Result<Vec<Asset>> {
        let rows = sqlx::query("SELECT * FROM assets ORDER BY created_at DESC, rowid DESC")
            .fetch_all(&self.database.pool)
            .await
            .context("Failed to load assets")?;
        rows.iter().map(map_row_to_asset).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Asset>> {
        let row = sqlx::query("SELECT * FROM assets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.database.pool)
            .await
            .context("Failed to load asset")?;
        row.as_ref().map(map_row_to_asset).transpose()
    }

    async fn add(&self, asset: &Asset) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assets (id, symbol, name, category, exchange, sector, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&asset.id)
        .bind(&asset.symbol)
        .bind(&asset.name)
        .bind(asset.category.to_string())
        .bind(&asset.exchange)
        .bind(&asset.sector)
        .bind(asset.is_active)
        .bind(asset.created_at.timestamp_millis())
        .execute(&self.database.pool)
        .await
        .context("Failed to save asset")?;

        Ok(())
    }

    async fn update(&self, asset: &Asset) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE assets SET
                symbol = ?, name = ?, category = ?, exchange = ?, sector = ?, is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&asset.symbol)
        .bind(&asset.name)
        .bind(asset.category.to_string())
        .bind(&asset.exchange)
        .bind(&asset.sector)
        .bind(asset.is_active)
        .bind(&asset.id)
        .execute(&self.database.pool)
        .await
        .context("Failed to update asset")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::asset_not_found(&asset.id).into());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = ?")
            .bind(id)
            .execute(&self.database.pool)
            .await
            .context("Failed to delete asset")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::asset_not_found(id).into());
        }
        Ok(())
    }
}

fn map_row_to_asset(row: &sqlx::sqlite::SqliteRow) -> Result<Asset> {
    let category: String = row.try_get("category")?;
    let created_at_ms: i64 = row.try_get("created_at")?;

    Ok(Asset {
        id: row.try_get("id")?,
        symbol: row.try_get("symbol")?,
        name: row.try_get("name")?,
        category: AssetCategory::from_str(&category)?,
        exchange: row.try_get("exchange")?,
        sector: row.try_get("sector")?,
        is_active: row.try_get("is_active")?,
        created_at: Utc
            .timestamp_millis_opt(created_at_ms)
            .single()
            .context("Invalid asset created_at")?,
    })
}

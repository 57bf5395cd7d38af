use crate::domain::errors::JournalError;
use crate::domain::journal::{Direction, EmotionalState, Trade};
use crate::domain::repositories::TradeRepository;
use crate::infrastructure::persistence::database::Database;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use std::str::FromStr;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
// `%.f` writes nothing for whole seconds and accepts rows stored without a fraction
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct SqliteTradeRepository {
    database: Database,
}

impl SqliteTradeRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl TradeRepository for SqliteTradeRepository {
    async fn get_all(&self) -> Result<Vec<Trade>> {
        let rows = sqlx::query("SELECT * FROM trades ORDER BY created_at DESC, rowid DESC")
            .fetch_all(&self.database.pool)
            .await?;
        rows.iter().map(map_row_to_trade).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Trade>> {
        let row = sqlx::query("SELECT * FROM trades WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.database.pool)
            .await?;
        row.as_ref().map(map_row_to_trade).transpose()
    }

    async fn add(&self, trade: &Trade) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trades
            (id, date, time, asset, direction, entry_price, exit_price, position_size,
             fees, is_open, pnl, closed_at, strategy, notes, market_conditions,
             emotional_state, tags_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&trade.id)
        .bind(trade.date.format(DATE_FORMAT).to_string())
        .bind(trade.time.format(TIME_FORMAT).to_string())
        .bind(&trade.asset)
        .bind(trade.direction.to_string())
        .bind(trade.entry_price.to_string())
        .bind(trade.exit_price.map(|p| p.to_string()))
        .bind(trade.position_size.to_string())
        .bind(trade.fees.map(|f| f.to_string()))
        .bind(trade.is_open)
        .bind(trade.pnl.map(|p| p.to_string()))
        .bind(trade.closed_at.map(|t| t.format(DATETIME_FORMAT).to_string()))
        .bind(&trade.strategy)
        .bind(&trade.notes)
        .bind(&trade.market_conditions)
        .bind(trade.emotional_state.map(|e| e.to_string()))
        .bind(serde_json::to_string(&trade.tags)?)
        .bind(trade.created_at.timestamp_millis())
        .execute(&self.database.pool)
        .await
        .context("Failed to save trade")?;

        debug!("Persisted trade {}", trade.id);
        Ok(())
    }

    async fn update(&self, trade: &Trade) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE trades SET
                date = ?, time = ?, asset = ?, direction = ?, entry_price = ?,
                exit_price = ?, position_size = ?, fees = ?, is_open = ?, pnl = ?,
                closed_at = ?, strategy = ?, notes = ?, market_conditions = ?,
                emotional_state = ?, tags_json = ?
            WHERE id = ?
            "#,
        )
        .bind(trade.date.format(DATE_FORMAT).to_string())
        .bind(trade.time.format(TIME_FORMAT).to_string())
        .bind(&trade.asset)
        .bind(trade.direction.to_string())
        .bind(trade.entry_price.to_string())
        .bind(trade.exit_price.map(|p| p.to_string()))
        .bind(trade.position_size.to_string())
        .bind(trade.fees.map(|f| f.to_string()))
        .bind(trade.is_open)
        .bind(trade.pnl.map(|p| p.to_string()))
        .bind(trade.closed_at.map(|t| t.format(DATETIME_FORMAT).to_string()))
        .bind(&trade.strategy)
        .bind(&trade.notes)
        .bind(&trade.market_conditions)
        .bind(trade.emotional_state.map(|e| e.to_string()))
        .bind(serde_json::to_string(&trade.tags)?)
        .bind(&trade.id)
        .execute(&self.database.pool)
        .await
        .context("Failed to update trade")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::trade_not_found(&trade.id).into());
        }
        Ok(())
    }

    async fn close(&self, trade: &Trade) -> Result<()> {
        // Guarded on the stored state so a second writer cannot book the exit again
        let result = sqlx::query(
            r#"
            UPDATE trades SET exit_price = ?, is_open = ?, pnl = ?, closed_at = ?
            WHERE id = ? AND (is_open = 1 OR exit_price IS NULL)
            "#,
        )
        .bind(trade.exit_price.map(|p| p.to_string()))
        .bind(trade.is_open)
        .bind(trade.pnl.map(|p| p.to_string()))
        .bind(trade.closed_at.map(|t| t.format(DATETIME_FORMAT).to_string()))
        .bind(&trade.id)
        .execute(&self.database.pool)
        .await
        .context("Failed to close trade")?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query("SELECT 1 FROM trades WHERE id = ?")
                .bind(&trade.id)
                .fetch_optional(&self.database.pool)
                .await?
                .is_some();
            let err = if exists {
                JournalError::TradeAlreadyClosed {
                    id: trade.id.clone(),
                }
            } else {
                JournalError::trade_not_found(&trade.id)
            };
            return Err(err.into());
        }

        debug!("Closed trade {}", trade.id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM trades WHERE id = ?")
            .bind(id)
            .execute(&self.database.pool)
            .await
            .context("Failed to delete trade")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::trade_not_found(id).into());
        }
        Ok(())
    }
}

fn parse_decimal(raw: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(raw).with_context(|| format!("Invalid decimal in column {}: {}", column, raw))
}

fn optional_decimal(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<Option<Decimal>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| parse_decimal(&s, column)).transpose()
}

fn map_row_to_trade(row: &sqlx::sqlite::SqliteRow) -> Result<Trade> {
    let date: String = row.try_get("date")?;
    let time: String = row.try_get("time")?;
    let direction: String = row.try_get("direction")?;
    let entry_price: String = row.try_get("entry_price")?;
    let position_size: String = row.try_get("position_size")?;
    let closed_at: Option<String> = row.try_get("closed_at")?;
    let emotional_state: Option<String> = row.try_get("emotional_state")?;
    let tags_json: String = row.try_get("tags_json")?;
    let created_at_ms: i64 = row.try_get("created_at")?;

    Ok(Trade {
        id: row.try_get("id")?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT).context("Invalid trade date")?,
        time: NaiveTime::parse_from_str(&time, TIME_FORMAT).context("Invalid trade time")?,
        asset: row.try_get("asset")?,
        direction: Direction::from_str(&direction)?,
        entry_price: parse_decimal(&entry_price, "entry_price")?,
        exit_price: optional_decimal(row, "exit_price")?,
        position_size: parse_decimal(&position_size, "position_size")?,
        fees: optional_decimal(row, "fees")?,
        is_open: row.try_get("is_open")?,
        pnl: optional_decimal(row, "pnl")?,
        closed_at: closed_at
            .map(|s| NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT))
            .transpose()
            .context("Invalid closed_at timestamp")?,
        strategy: row.try_get("strategy")?,
        notes: row.try_get("notes")?,
        market_conditions: row.try_get("market_conditions")?,
        emotional_state: emotional_state
            .map(|s| EmotionalState::from_str(&s))
            .transpose()?,
        tags: serde_json::from_str(&tags_json).context("Invalid trade tags")?,
        created_at: Utc
            .timestamp_millis_opt(created_at_ms)
            .single()
            .context("Invalid created_at timestamp")?,
    })
}

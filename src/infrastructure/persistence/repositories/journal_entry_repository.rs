use crate::domain::errors::JournalError;
use crate::domain::journal::{JournalEntry, Mood};
use crate::domain::repositories::JournalEntryRepository;
use crate::infrastructure::persistence::database::Database;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::str::FromStr;

type EntryRow = (String, String, String, String, String, String, i64);

pub struct SqliteJournalEntryRepository {
    database: Database,
}

impl SqliteJournalEntryRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl JournalEntryRepository for SqliteJournalEntryRepository {
    async fn get_all(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, date, title, content, mood, tags_json, created_at
            FROM journal_entries
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.database.pool)
        .await
        .context("Failed to load journal entries")?;

        rows.into_iter().map(map_row_to_entry).collect()
    }

    async fn add(&self, entry: &JournalEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, date, title, content, mood, tags_json, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.date.to_string())
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.mood.to_string())
        .bind(serde_json::to_string(&entry.tags)?)
        .bind(entry.created_at.timestamp_millis())
        .execute(&self.database.pool)
        .await
        .context("Failed to save journal entry")?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
            .bind(id)
            .execute(&self.database.pool)
            .await
            .context("Failed to delete journal entry")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::entry_not_found(id).into());
        }
        Ok(())
    }
}

fn map_row_to_entry(row: EntryRow) -> Result<JournalEntry> {
    let (id, date, title, content, mood, tags_json, created_at_ms) = row;

    Ok(JournalEntry {
        id,
        date: NaiveDate::from_str(&date).context("Invalid journal entry date")?,
        title,
        content,
        mood: Mood::from_str(&mood)?,
        tags: serde_json::from_str(&tags_json).context("Invalid journal entry tags")?,
        created_at: Utc
            .timestamp_millis_opt(created_at_ms)
            .single()
            .context("Invalid journal entry created_at")?,
    })
}

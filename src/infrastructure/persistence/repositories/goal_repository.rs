use crate::domain::errors::JournalError;
use crate::domain::journal::{Goal, GoalCategory, GoalType, Priority};
use crate::domain::repositories::GoalRepository;
use crate::infrastructure::persistence::database::Database;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::str::FromStr;

type GoalRow = (
    String,
    String,
    String,
    f64,
    String,
    String,
    String,
    bool,
    String,
);

const GOAL_COLUMNS: &str =
    "id, goal_type, category, target, created_at, deadline, description, is_active, priority";

pub struct SqliteGoalRepository {
    database: Database,
}

impl SqliteGoalRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl GoalRepository for SqliteGoalRepository {
    async fn get_all(&self) -> Result<Vec<Goal>> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {} FROM goals ORDER BY rowid DESC",
            GOAL_COLUMNS
        ))
        .fetch_all(&self.database.pool)
        .await
        .context("Failed to load goals")?;

        rows.into_iter().map(map_row_to_goal).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Goal>> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {} FROM goals WHERE id = $1",
            GOAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.database.pool)
        .await
        .context("Failed to load goal")?;

        row.map(map_row_to_goal).transpose()
    }

    async fn add(&self, goal: &Goal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO goals (
                id, goal_type, category, target, created_at,
                deadline, description, is_active, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&goal.id)
        .bind(goal.goal_type.to_string())
        .bind(goal.category.to_string())
        .bind(goal.target)
        .bind(goal.created_at.to_string())
        .bind(goal.deadline.to_string())
        .bind(&goal.description)
        .bind(goal.is_active)
        .bind(goal.priority.to_string())
        .execute(&self.database.pool)
        .await
        .context("Failed to save goal")?;

        Ok(())
    }

    async fn update(&self, goal: &Goal) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE goals SET
                goal_type = $1,
                category = $2,
                target = $3,
                created_at = $4,
                deadline = $5,
                description = $6,
                is_active = $7,
                priority = $8
            WHERE id = $9
            "#,
        )
        .bind(goal.goal_type.to_string())
        .bind(goal.category.to_string())
        .bind(goal.target)
        .bind(goal.created_at.to_string())
        .bind(goal.deadline.to_string())
        .bind(&goal.description)
        .bind(goal.is_active)
        .bind(goal.priority.to_string())
        .bind(&goal.id)
        .execute(&self.database.pool)
        .await
        .context("Failed to update goal")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::goal_not_found(&goal.id).into());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.database.pool)
            .await
            .context("Failed to delete goal")?;

        if result.rows_affected() == 0 {
            return Err(JournalError::goal_not_found(id).into());
        }
        Ok(())
    }
}

fn map_row_to_goal(row: GoalRow) -> Result<Goal> {
    let (id, goal_type, category, target, created_at, deadline, description, is_active, priority) =
        row;

    Ok(Goal {
        id,
        goal_type: GoalType::from_str(&goal_type)?,
        category: GoalCategory::from_str(&category)?,
        target,
        created_at: NaiveDate::from_str(&created_at).context("Invalid goal created_at")?,
        deadline: NaiveDate::from_str(&deadline).context("Invalid goal deadline")?,
        description,
        is_active,
        priority: Priority::from_str(&priority)?,
    })
}

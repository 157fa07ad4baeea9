//! SQLite implementation of the BaseCalendarRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::parse_uuid;
use crate::domain::errors::DomainResult;
use crate::domain::models::BaseCalendar;
use crate::domain::ports::BaseCalendarRepository;

#[derive(Clone)]
pub struct SqliteBaseCalendarRepository {
    pool: SqlitePool,
}

impl SqliteBaseCalendarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCalendarRepository for SqliteBaseCalendarRepository {
    async fn list(&self) -> DomainResult<Vec<BaseCalendar>> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, name FROM base_calendars ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(id, name)| Ok(BaseCalendar { id: parse_uuid(&id)?, name }))
            .collect()
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<BaseCalendar>> {
        let row: Option<(String, String)> = sqlx::query_as("SELECT id, name FROM base_calendars WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(id, name)| Ok(BaseCalendar { id: parse_uuid(&id)?, name }))
            .transpose()
    }

    async fn save(&self, calendar: &BaseCalendar) -> DomainResult<()> {
        sqlx::query("INSERT INTO base_calendars (id, name) VALUES (?, ?) ON CONFLICT(id) DO UPDATE SET name = excluded.name")
            .bind(calendar.id.to_string())
            .bind(&calendar.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

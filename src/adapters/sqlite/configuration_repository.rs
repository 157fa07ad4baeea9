//! SQLite implementation of the ConfigurationRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{parse_optional_uuid, parse_uuid};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Configuration;
use crate::domain::ports::ConfigurationRepository;

#[derive(Clone)]
pub struct SqliteConfigurationRepository {
    pool: SqlitePool,
}

impl SqliteConfigurationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigurationRepository for SqliteConfigurationRepository {
    async fn get(&self) -> DomainResult<Option<Configuration>> {
        let row: Option<ConfigurationRow> = sqlx::query_as(
            "SELECT id, default_calendar_id, company_code, generate_code_for_criterion, generate_code_for_resources FROM configuration LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn save(&self, configuration: &Configuration) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO configuration (id, singleton, default_calendar_id, company_code, generate_code_for_criterion, generate_code_for_resources, updated_at)
               VALUES (?, 1, ?, ?, ?, ?, ?)
               ON CONFLICT(singleton) DO UPDATE SET
                   id = excluded.id,
                   default_calendar_id = excluded.default_calendar_id,
                   company_code = excluded.company_code,
                   generate_code_for_criterion = excluded.generate_code_for_criterion,
                   generate_code_for_resources = excluded.generate_code_for_resources,
                   updated_at = excluded.updated_at"#,
        )
        .bind(configuration.id.to_string())
        .bind(configuration.default_calendar_id.map(|id| id.to_string()))
        .bind(&configuration.company_code)
        .bind(configuration.generate_code_for_criterion)
        .bind(configuration.generate_code_for_resources)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ConfigurationRow {
    id: String,
    default_calendar_id: Option<String>,
    company_code: Option<String>,
    generate_code_for_criterion: bool,
    generate_code_for_resources: bool,
}

impl TryFrom<ConfigurationRow> for Configuration {
    type Error = DomainError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        Ok(Configuration {
            id: parse_uuid(&row.id)?,
            default_calendar_id: parse_optional_uuid(row.default_calendar_id)?,
            company_code: row.company_code,
            generate_code_for_criterion: row.generate_code_for_criterion,
            generate_code_for_resources: row.generate_code_for_resources,
        })
    }
}

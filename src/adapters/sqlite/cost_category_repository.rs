//! SQLite implementation of the CostCategoryRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::parse_uuid;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::CostCategory;
use crate::domain::ports::CostCategoryRepository;

#[derive(Clone)]
pub struct SqliteCostCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCostCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CostCategoryRepository for SqliteCostCategoryRepository {
    async fn create(&self, category: &CostCategory) -> DomainResult<()> {
        category.validate().map_err(DomainError::validation)?;

        sqlx::query("INSERT INTO cost_categories (id, code, name, enabled) VALUES (?, ?, ?, ?)")
            .bind(category.id.to_string())
            .bind(&category.code)
            .bind(&category.name)
            .bind(category.enabled)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<CostCategory>> {
        let row: Option<CostCategoryRow> =
            sqlx::query_as("SELECT id, code, name, enabled FROM cost_categories WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, category: &CostCategory) -> DomainResult<()> {
        category.validate().map_err(DomainError::validation)?;

        let result = sqlx::query("UPDATE cost_categories SET code = ?, name = ?, enabled = ? WHERE id = ?")
            .bind(&category.code)
            .bind(&category.name)
            .bind(category.enabled)
            .bind(category.id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("CostCategory", category.id));
        }

        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<CostCategory>> {
        let rows: Vec<CostCategoryRow> =
            sqlx::query_as("SELECT id, code, name, enabled FROM cost_categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_active(&self) -> DomainResult<Vec<CostCategory>> {
        let rows: Vec<CostCategoryRow> = sqlx::query_as(
            "SELECT id, code, name, enabled FROM cost_categories WHERE enabled = 1 ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn remove(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM cost_categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("CostCategory", id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CostCategoryRow {
    id: String,
    code: String,
    name: String,
    enabled: bool,
}

impl TryFrom<CostCategoryRow> for CostCategory {
    type Error = DomainError;

    fn try_from(row: CostCategoryRow) -> Result<Self, Self::Error> {
        Ok(CostCategory {
            id: parse_uuid(&row.id)?,
            code: row.code,
            name: row.name,
            enabled: row.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqliteCostCategoryRepository {
        SqliteCostCategoryRepository::new(create_migrated_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_find_active_skips_disabled() {
        let repo = setup_test_repo().await;
        repo.create(&CostCategory::new("CC1", "Senior")).await.unwrap();
        repo.create(&CostCategory::new("CC2", "Junior")).await.unwrap();
        repo.create(&CostCategory::new("CC3", "Legacy").disabled()).await.unwrap();

        let active: Vec<String> = repo.find_active().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(active, vec!["Junior", "Senior"]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let repo = setup_test_repo().await;
        let mut category = CostCategory::new("CC1", "Senior");
        repo.create(&category).await.unwrap();

        category.enabled = false;
        repo.update(&category).await.unwrap();
        assert!(repo.find_active().await.unwrap().is_empty());

        repo.remove(category.id).await.unwrap();
        assert!(repo.get(category.id).await.unwrap().is_none());
        assert!(matches!(
            repo.remove(category.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let repo = setup_test_repo().await;
        let err = repo.create(&CostCategory::new("CC1", " ")).await.unwrap_err();
        assert!(err.is_validation());
    }
}

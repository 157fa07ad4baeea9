//! SQLite implementation of the OrderSequenceRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::parse_uuid;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::OrderSequence;
use crate::domain::ports::OrderSequenceRepository;

const COLUMNS: &str = "id, prefix, last_order_number, number_of_digits, active";

#[derive(Clone)]
pub struct SqliteOrderSequenceRepository {
    pool: SqlitePool,
}

impl SqliteOrderSequenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderSequenceRepository for SqliteOrderSequenceRepository {
    async fn list(&self) -> DomainResult<Vec<OrderSequence>> {
        // rowid keeps insertion order across upserts
        let rows: Vec<OrderSequenceRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM order_sequences ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<OrderSequence>> {
        let row: Option<OrderSequenceRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM order_sequences WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn save(&self, sequence: &OrderSequence) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO order_sequences (id, prefix, last_order_number, number_of_digits, active)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   prefix = excluded.prefix,
                   last_order_number = excluded.last_order_number,
                   number_of_digits = excluded.number_of_digits,
                   active = excluded.active"#,
        )
        .bind(sequence.id.to_string())
        .bind(&sequence.prefix)
        .bind(i64::from(sequence.last_order_number))
        .bind(i64::from(sequence.number_of_digits))
        .bind(sequence.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_not_in(&self, ids: &[Uuid]) -> DomainResult<Vec<OrderSequence>> {
        let mut query = format!("SELECT {COLUMNS} FROM order_sequences");
        if !ids.is_empty() {
            let placeholders = vec!["?"; ids.len()].join(", ");
            query.push_str(&format!(" WHERE id NOT IN ({placeholders})"));
        }
        query.push_str(" ORDER BY rowid");

        let mut q = sqlx::query_as::<_, OrderSequenceRow>(&query);
        for id in ids {
            q = q.bind(id.to_string());
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn remove(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM order_sequences WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("OrderSequence", id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct OrderSequenceRow {
    id: String,
    prefix: String,
    last_order_number: i64,
    number_of_digits: i64,
    active: bool,
}

impl TryFrom<OrderSequenceRow> for OrderSequence {
    type Error = DomainError;

    fn try_from(row: OrderSequenceRow) -> Result<Self, Self::Error> {
        let last_order_number = u32::try_from(row.last_order_number).map_err(|_| {
            DomainError::Serialization(format!("Invalid last_order_number: {}", row.last_order_number))
        })?;
        let number_of_digits = u8::try_from(row.number_of_digits).map_err(|_| {
            DomainError::Serialization(format!("Invalid number_of_digits: {}", row.number_of_digits))
        })?;

        Ok(OrderSequence {
            id: parse_uuid(&row.id)?,
            prefix: row.prefix,
            last_order_number,
            number_of_digits,
            active: row.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqliteOrderSequenceRepository {
        SqliteOrderSequenceRepository::new(create_migrated_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_save_is_an_upsert() {
        let repo = setup_test_repo().await;
        let mut seq = OrderSequence::new("ORD").activated();
        repo.save(&seq).await.unwrap();

        seq.last_order_number = 41;
        repo.save(&seq).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].next_order_code(), "ORD00042");
    }

    #[tokio::test]
    async fn test_find_not_in() {
        let repo = setup_test_repo().await;
        let a = OrderSequence::new("A");
        let b = OrderSequence::new("B");
        repo.save(&a).await.unwrap();
        repo.save(&b).await.unwrap();

        let stale = repo.find_not_in(&[a.id]).await.unwrap();
        assert_eq!(stale, vec![b.clone()]);
        assert_eq!(repo.find_not_in(&[]).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let repo = setup_test_repo().await;
        let err = repo.remove(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}

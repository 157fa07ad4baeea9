//! Order sequence repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::OrderSequence;

/// Repository interface for OrderSequence persistence.
#[async_trait]
pub trait OrderSequenceRepository: Send + Sync {
    /// All stored sequences.
    async fn list(&self) -> DomainResult<Vec<OrderSequence>>;

    /// Get a sequence by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<OrderSequence>>;

    /// Insert or update a sequence.
    async fn save(&self, sequence: &OrderSequence) -> DomainResult<()>;

    /// Stored sequences whose id is not in `ids`.
    async fn find_not_in(&self, ids: &[Uuid]) -> DomainResult<Vec<OrderSequence>>;

    /// Delete a sequence; fails with `NotFound` if it does not exist.
    async fn remove(&self, id: Uuid) -> DomainResult<()>;
}

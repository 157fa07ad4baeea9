//! Cost category repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::CostCategory;

/// Repository interface for CostCategory persistence.
#[async_trait]
pub trait CostCategoryRepository: Send + Sync {
    /// Create a new cost category.
    async fn create(&self, category: &CostCategory) -> DomainResult<()>;

    /// Get a cost category by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<CostCategory>>;

    /// Update an existing cost category.
    async fn update(&self, category: &CostCategory) -> DomainResult<()>;

    /// All cost categories ordered by name.
    async fn list(&self) -> DomainResult<Vec<CostCategory>>;

    /// Enabled cost categories only.
    async fn find_active(&self) -> DomainResult<Vec<CostCategory>>;

    /// Delete a cost category; fails with `NotFound` if it does not exist.
    async fn remove(&self, id: Uuid) -> DomainResult<()>;
}

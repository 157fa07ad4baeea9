//! Resource searcher port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CriterionGroup, Resource, ResourceKind, ResourceQuery};

/// Query facade over the resource catalog.
#[async_trait]
pub trait ResourceSearcher: Send + Sync {
    /// Resources matching every filter in `query`, in catalog order.
    async fn search(&self, query: &ResourceQuery) -> DomainResult<Vec<Resource>>;

    /// All criteria applicable to the given resource kinds, grouped by type.
    async fn criteria(&self, kinds: &[ResourceKind]) -> DomainResult<Vec<CriterionGroup>>;
}

//! Query value handed to the resource searcher.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::criterion::Criterion;
use super::resource::{Resource, ResourceKind, ResourceType};

/// Filters for a resource search.
///
/// Built fluently: the allocation type picks the resource kinds, the caller
/// then narrows by name, criteria, and resource type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceQuery {
    pub kinds: Vec<ResourceKind>,
    pub name: Option<String>,
    pub criteria: Vec<Uuid>,
    pub resource_type: Option<ResourceType>,
}

impl ResourceQuery {
    pub fn workers() -> Self {
        Self {
            kinds: vec![ResourceKind::Worker],
            ..Self::default()
        }
    }

    pub fn machines() -> Self {
        Self {
            kinds: vec![ResourceKind::Machine],
            ..Self::default()
        }
    }

    pub fn workers_and_machines() -> Self {
        Self {
            kinds: vec![ResourceKind::Worker, ResourceKind::Machine],
            ..Self::default()
        }
    }

    /// Restricts to resources whose description contains `name`.
    /// An empty filter matches everything.
    pub fn by_name(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        self.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Restricts to resources satisfying every given criterion.
    pub fn by_criteria(mut self, criteria: &[Criterion]) -> Self {
        self.criteria = criteria.iter().map(|c| c.id).collect();
        self
    }

    pub fn by_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    /// Checks the resource-local filters (kind, type, name).
    ///
    /// Criteria satisfaction lives in the resource catalog and is checked by
    /// the searcher.
    pub fn matches_resource(&self, resource: &Resource) -> bool {
        if !self.kinds.contains(&resource.kind) {
            return false;
        }
        if let Some(resource_type) = self.resource_type {
            if resource.resource_type != resource_type {
                return false;
            }
        }
        match &self.name {
            Some(name) => {
                let needle = name.to_lowercase();
                resource.short_description().to_lowercase().contains(&needle)
                    || resource.code.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

//! In-memory resource catalog.
//!
//! Implements the resource searcher over resources and criteria held in
//! memory. Used by the CLI (loaded from a YAML catalog file) and by tests.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use super::load_ratios::StaticLoadRatios;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Criterion, CriterionGroup, CriterionType, LoadRatios, Resource, ResourceKind, ResourceQuery,
    ResourceType,
};
use crate::domain::ports::ResourceSearcher;

#[derive(Default)]
struct CatalogState {
    criterion_types: Vec<CriterionType>,
    criteria: Vec<Criterion>,
    resources: Vec<Resource>,
    satisfactions: HashMap<Uuid, HashSet<Uuid>>,
}

#[derive(Default)]
pub struct InMemoryResourceCatalog {
    state: RwLock<CatalogState>,
    searches: AtomicUsize,
}

impl InMemoryResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_criterion_type(&self, criterion_type: CriterionType) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.criterion_types.push(criterion_type);
    }

    pub fn add_criterion(&self, criterion: Criterion) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.criteria.push(criterion);
    }

    /// Adds a resource satisfying the given criteria.
    pub fn add_resource(&self, resource: Resource, criteria: &[Uuid]) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state
            .satisfactions
            .insert(resource.id, criteria.iter().copied().collect());
        state.resources.push(resource);
    }

    /// Number of searches served; lets tests check the searcher was skipped.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn resource_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resources
            .len()
    }

    /// Loads a YAML catalog file. Returns the catalog and the ratios the
    /// file declares for its resources.
    pub fn load_from_file(path: impl AsRef<Path>) -> DomainResult<(Self, StaticLoadRatios)> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DomainError::Serialization(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::load_from_yaml(&text)
    }

    pub fn load_from_yaml(yaml: &str) -> DomainResult<(Self, StaticLoadRatios)> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| DomainError::Serialization(e.to_string()))?;

        let catalog = Self::new();
        let ratios = StaticLoadRatios::new(file.default_load.unwrap_or(LoadRatios::new(1.0, 0.0)));
        let mut by_name: HashMap<String, Uuid> = HashMap::new();

        for entry in file.criterion_types {
            let mut criterion_type = CriterionType::new(entry.name);
            criterion_type.applies_to = entry.applies_to;
            for criterion in entry.criteria {
                catalog.add_criterion_tree(&criterion_type, criterion, None, &mut by_name);
            }
            catalog.add_criterion_type(criterion_type);
        }

        for entry in file.resources {
            let mut resource = match entry.kind {
                ResourceKind::Worker => Resource::worker(entry.first_name.unwrap_or_default(), entry.name),
                ResourceKind::Machine => Resource::machine(entry.name),
            };
            resource.code = entry.code;
            resource.resource_type = entry.resource_type;
            let criteria = entry
                .criteria
                .iter()
                .map(|name| {
                    by_name.get(name).copied().ok_or_else(|| {
                        DomainError::Serialization(format!("unknown criterion '{name}'"))
                    })
                })
                .collect::<DomainResult<Vec<_>>>()?;
            if let Some(load) = entry.load {
                ratios.set(resource.id, load);
            }
            catalog.add_resource(resource, &criteria);
        }

        Ok((catalog, ratios))
    }

    fn add_criterion_tree(
        &self,
        criterion_type: &CriterionType,
        entry: CriterionEntry,
        parent: Option<&Criterion>,
        by_name: &mut HashMap<String, Uuid>,
    ) {
        let mut criterion = Criterion::new(criterion_type, entry.name);
        criterion.parent_id = parent.map(|p| p.id);
        criterion.active = entry.active;
        by_name.entry(criterion.name.clone()).or_insert(criterion.id);
        for child in entry.children {
            self.add_criterion_tree(criterion_type, child, Some(&criterion), by_name);
        }
        self.add_criterion(criterion);
    }
}

#[async_trait]
impl ResourceSearcher for InMemoryResourceCatalog {
    async fn search(&self, query: &ResourceQuery) -> DomainResult<Vec<Resource>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let empty = HashSet::new();
        Ok(state
            .resources
            .iter()
            .filter(|r| query.matches_resource(r))
            .filter(|r| {
                let satisfied = state.satisfactions.get(&r.id).unwrap_or(&empty);
                query.criteria.iter().all(|c| satisfied.contains(c))
            })
            .cloned()
            .collect())
    }

    async fn criteria(&self, kinds: &[ResourceKind]) -> DomainResult<Vec<CriterionGroup>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .criterion_types
            .iter()
            .filter(|t| kinds.iter().any(|k| t.applies_to_kind(*k)))
            .map(|t| CriterionGroup {
                criterion_type: t.clone(),
                criteria: state
                    .criteria
                    .iter()
                    .filter(|c| c.type_id == t.id && c.active)
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    default_load: Option<LoadRatios>,
    #[serde(default)]
    criterion_types: Vec<CriterionTypeEntry>,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
struct CriterionTypeEntry {
    name: String,
    #[serde(default)]
    applies_to: Option<ResourceKind>,
    #[serde(default)]
    criteria: Vec<CriterionEntry>,
}

#[derive(Debug, Deserialize)]
struct CriterionEntry {
    name: String,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default)]
    children: Vec<CriterionEntry>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ResourceEntry {
    kind: ResourceKind,
    name: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    code: String,
    #[serde(default)]
    resource_type: ResourceType,
    #[serde(default)]
    criteria: Vec<String>,
    #[serde(default)]
    load: Option<LoadRatios>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r"
criterion_types:
  - name: Skill
    applies_to: worker
    criteria:
      - name: Welding
        children:
          - name: TIG
      - name: Retired skill
        active: false
  - name: Location
    criteria:
      - name: Vigo
resources:
  - kind: worker
    first_name: Ada
    name: Lovelace
    criteria: [TIG, Vigo]
    load: { availability: 0.3, overtime: 0.0 }
  - kind: machine
    name: Lathe
    criteria: [Vigo]
";

    #[tokio::test]
    async fn test_load_from_yaml() {
        let (catalog, _) = InMemoryResourceCatalog::load_from_yaml(CATALOG).unwrap();
        assert_eq!(catalog.resource_count(), 2);

        let groups = catalog.criteria(&[ResourceKind::Machine]).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].criterion_type.name, "Location");

        let groups = catalog.criteria(&[ResourceKind::Worker]).await.unwrap();
        let skill = groups.iter().find(|g| g.criterion_type.name == "Skill").unwrap();
        assert_eq!(skill.criteria.len(), 2);
    }

    #[tokio::test]
    async fn test_search_requires_all_criteria() {
        let (catalog, _) = InMemoryResourceCatalog::load_from_yaml(CATALOG).unwrap();
        let groups = catalog.criteria(&[ResourceKind::Worker]).await.unwrap();
        let vigo = groups
            .iter()
            .flat_map(|g| g.criteria.iter())
            .find(|c| c.name == "Vigo")
            .unwrap()
            .clone();

        let query = ResourceQuery::workers_and_machines().by_criteria(&[vigo]);
        assert_eq!(catalog.search(&query).await.unwrap().len(), 2);

        let query = ResourceQuery::machines().by_name("lat");
        let found = catalog.search(&query).await.unwrap();
        assert_eq!(found[0].name, "Lathe");
        assert_eq!(catalog.search_count(), 2);
    }

    #[test]
    fn test_unknown_criterion_is_rejected() {
        let yaml = "resources:\n  - kind: machine\n    name: Lathe\n    criteria: [Nope]\n";
        assert!(InMemoryResourceCatalog::load_from_yaml(yaml).is_err());
    }
}

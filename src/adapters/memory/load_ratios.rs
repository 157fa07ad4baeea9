//! Load ratios read from a table instead of computed from assignments.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{LoadRatios, Resource, Scenario};
use crate::domain::ports::LoadRatiosCalculator;

/// Returns per-resource ratios set up front, or a default for the rest.
/// The date window and scenario are ignored.
#[derive(Default)]
pub struct StaticLoadRatios {
    default: LoadRatios,
    by_resource: RwLock<HashMap<Uuid, LoadRatios>>,
}

impl StaticLoadRatios {
    pub fn new(default: LoadRatios) -> Self {
        Self {
            default,
            by_resource: RwLock::new(HashMap::new()),
        }
    }

    pub fn set(&self, resource_id: Uuid, ratios: LoadRatios) {
        self.by_resource
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource_id, ratios);
    }
}

#[async_trait]
impl LoadRatiosCalculator for StaticLoadRatios {
    async fn calculate(
        &self,
        resource: &Resource,
        _start: NaiveDate,
        _end: NaiveDate,
        _scenario: &Scenario,
    ) -> DomainResult<LoadRatios> {
        Ok(self
            .by_resource
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&resource.id)
            .copied()
            .unwrap_or(self.default))
    }
}

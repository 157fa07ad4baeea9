//! Load ratios computed for a resource over a date window.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use super::resource::Resource;

/// Utilization figures for one resource.
///
/// `availability` is the fraction of the window the resource is still free
/// (0.0 to 1.0). `overtime` is the fraction of assigned work that exceeds
/// the resource's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadRatios {
    pub availability: f64,
    pub overtime: f64,
}

impl LoadRatios {
    pub fn new(availability: f64, overtime: f64) -> Self {
        Self {
            availability,
            overtime,
        }
    }
}

/// The planning scenario the ratios are computed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn master() -> Self {
        Self {
            id: Uuid::nil(),
            name: "master".to_string(),
        }
    }
}

/// A search result row. Rebuilt on every search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceWithLoadRatios {
    pub resource: Resource,
    pub ratios: LoadRatios,
}

impl ResourceWithLoadRatios {
    pub fn new(resource: Resource, ratios: LoadRatios) -> Self {
        Self { resource, ratios }
    }

    /// Orders rows by their resource alone; ratios are ignored.
    pub fn by_resource(a: &Self, b: &Self) -> Ordering {
        a.resource.cmp(&b.resource)
    }
}

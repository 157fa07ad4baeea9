//! Resource domain model.
//!
//! Resources are the workers and machines that can be allocated to tasks.
//! They are owned by the resource catalog; this crate only reads them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Whether a resource is a person or a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Worker,
    Machine,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Machine => "machine",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "worker" => Some(Self::Worker),
            "machine" => Some(Self::Machine),
            _ => None,
        }
    }
}

/// Whether a resource takes part in limiting (queue based) allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    NonLimiting,
    Limiting,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonLimiting => "non_limiting",
            Self::Limiting => "limiting",
        }
    }
}

/// A worker or machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub kind: ResourceKind,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub code: String,
    /// Surname for workers, name for machines.
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl Resource {
    pub fn worker(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ResourceKind::Worker,
            resource_type: ResourceType::NonLimiting,
            code: String::new(),
            name: surname.into(),
            first_name: Some(first_name.into()),
        }
    }

    pub fn machine(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ResourceKind::Machine,
            resource_type: ResourceType::NonLimiting,
            code: String::new(),
            name: name.into(),
            first_name: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    /// Name shown in lists and captions.
    pub fn short_description(&self) -> String {
        match (&self.kind, &self.first_name) {
            (ResourceKind::Worker, Some(first)) if !first.is_empty() => {
                format!("{} {}", first, self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// Comma-joined short descriptions.
    pub fn caption_for(resources: &[Resource]) -> String {
        resources
            .iter()
            .map(Resource::short_description)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.short_description()
            .to_lowercase()
            .cmp(&other.short_description().to_lowercase())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

//! Sink for the allocations chosen in the allocation selector.

use crate::domain::models::{Criterion, Resource, ResourceKind};

/// Receives new allocations for the task being planned.
pub trait NewAllocationsAdder {
    /// One allocation per resource.
    fn add_specific(&mut self, resources: &[Resource]);

    /// One generic allocation over every resource of `kind` satisfying
    /// `criteria`; `resources` are the candidates currently known.
    fn add_generic(&mut self, kind: ResourceKind, criteria: &[Criterion], resources: &[Resource]);
}

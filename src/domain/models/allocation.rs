//! Allocation types and the per-type dispatch table.
//!
//! An allocation either names specific resources or asks for "any resource
//! matching these criteria" (a generic allocation). The behaviour of each
//! type lives in a static [`AllocationTypeOps`] entry rather than being
//! spread across `match` arms.

use serde::{Deserialize, Serialize};

use super::criterion::Criterion;
use super::resource::{Resource, ResourceKind, ResourceType};
use super::resource_query::ResourceQuery;
use crate::domain::ports::{NewAllocationsAdder, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    Specific,
    GenericWorkers,
    GenericMachines,
}

/// Everything an allocation type needs to hand its selection to an adder.
#[derive(Debug, Clone, Default)]
pub struct AllocationSelection {
    pub selected_workers: Vec<Resource>,
    pub criteria: Vec<Criterion>,
}

/// Behaviour attached to one allocation type.
pub struct AllocationTypeOps {
    /// Display name (message id).
    pub name: &'static str,
    /// Base query restricting the resource kinds this type can allocate.
    pub scope_query: fn() -> ResourceQuery,
    /// Caption for the current criteria selection. Only meaningful for
    /// generic types; specific captions come from the selected resources.
    pub caption: fn(&[Criterion], &Translator) -> String,
    pub add_to: fn(&AllocationSelection, &mut dyn NewAllocationsAdder),
}

static SPECIFIC_OPS: AllocationTypeOps = AllocationTypeOps {
    name: "specific allocation",
    scope_query: ResourceQuery::workers_and_machines,
    caption: |criteria, _| Criterion::caption_for(criteria),
    add_to: |selection, adder| adder.add_specific(&selection.selected_workers),
};

static GENERIC_WORKERS_OPS: AllocationTypeOps = AllocationTypeOps {
    name: "generic workers allocation",
    scope_query: ResourceQuery::workers,
    caption: |criteria, translator| generic_caption(criteria, translator, "[generic all workers]"),
    add_to: |selection, adder| {
        adder.add_generic(
            ResourceKind::Worker,
            &selection.criteria,
            &selection.selected_workers,
        );
    },
};

static GENERIC_MACHINES_OPS: AllocationTypeOps = AllocationTypeOps {
    name: "generic machines allocation",
    scope_query: ResourceQuery::machines,
    caption: |criteria, translator| {
        generic_caption(criteria, translator, "[generic all machines]")
    },
    add_to: |selection, adder| {
        adder.add_generic(
            ResourceKind::Machine,
            &selection.criteria,
            &selection.selected_workers,
        );
    },
};

fn generic_caption(criteria: &[Criterion], translator: &Translator, when_empty: &str) -> String {
    if criteria.is_empty() {
        translator.tr(when_empty)
    } else {
        Criterion::caption_for(criteria)
    }
}

impl AllocationType {
    /// Declaration order; the first entry is the default mode.
    pub const ALL: [AllocationType; 3] = [
        AllocationType::Specific,
        AllocationType::GenericWorkers,
        AllocationType::GenericMachines,
    ];

    pub fn ops(self) -> &'static AllocationTypeOps {
        match self {
            Self::Specific => &SPECIFIC_OPS,
            Self::GenericWorkers => &GENERIC_WORKERS_OPS,
            Self::GenericMachines => &GENERIC_MACHINES_OPS,
        }
    }

    pub fn is_generic(self) -> bool {
        matches!(self, Self::GenericWorkers | Self::GenericMachines)
    }

    pub fn name(self) -> &'static str {
        self.ops().name
    }

    pub fn query(self) -> ResourceQuery {
        (self.ops().scope_query)()
    }

    pub fn as_caption(self, criteria: &[Criterion], translator: &Translator) -> String {
        (self.ops().caption)(criteria, translator)
    }

    pub fn add_to(self, selection: &AllocationSelection, adder: &mut dyn NewAllocationsAdder) {
        (self.ops().add_to)(selection, adder);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::GenericWorkers => "generic_workers",
            Self::GenericMachines => "generic_machines",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "specific" => Some(Self::Specific),
            "generic_workers" => Some(Self::GenericWorkers),
            "generic_machines" => Some(Self::GenericMachines),
            _ => None,
        }
    }
}

/// How the allocation being edited treats resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationBehaviour {
    #[default]
    NonLimiting,
    Limiting,
}

impl AllocationBehaviour {
    /// Allocation types offered, in declaration order.
    pub fn allocation_types(self) -> &'static [AllocationType] {
        match self {
            Self::NonLimiting => &AllocationType::ALL,
            Self::Limiting => &[AllocationType::Specific, AllocationType::GenericWorkers],
        }
    }

    pub fn allows_multiple_selection(self) -> bool {
        matches!(self, Self::NonLimiting)
    }

    pub fn resource_type(self) -> ResourceType {
        match self {
            Self::NonLimiting => ResourceType::NonLimiting,
            Self::Limiting => ResourceType::Limiting,
        }
    }

    pub fn offers(self, allocation_type: AllocationType) -> bool {
        self.allocation_types().contains(&allocation_type)
    }
}

//! Domain models for resplan.

pub mod allocation;
pub mod config;
pub mod configuration;
pub mod cost_category;
pub mod criterion;
pub mod load_ratios;
pub mod order_sequence;
pub mod resource;
pub mod resource_query;

pub use allocation::{AllocationBehaviour, AllocationSelection, AllocationType, AllocationTypeOps};
pub use config::{AllocationConfig, Config, DatabaseConfig, LoggingConfig, MessagesConfig};
pub use configuration::{BaseCalendar, Configuration};
pub use cost_category::CostCategory;
pub use criterion::{Criterion, CriterionGroup, CriterionType};
pub use load_ratios::{LoadRatios, ResourceWithLoadRatios, Scenario};
pub use order_sequence::OrderSequence;
pub use resource::{Resource, ResourceKind, ResourceType};
pub use resource_query::ResourceQuery;

//! resplan: resource allocation selection and project configuration.
//!
//! The crate models the part of a project planner that picks resources for a
//! task allocation and the company-wide configuration behind it:
//!
//! - **Domain** (`domain`): resources, criteria, allocation types, order
//!   sequences and the ports services depend on
//! - **Services** (`services`): the allocation selector, the criterion tree
//!   builder, the configuration conversation and required-data bootstrap
//! - **Presentation** (`presentation`): pure renderers for resource rows and
//!   criterion trees
//! - **Adapters** (`adapters`): SQLite persistence and an in-memory resource
//!   catalog
//! - **Infrastructure** (`infrastructure`): configuration, logging and
//!   message catalogs
//! - **Importers** (`importers`): payloads of external work-report sources
//! - **CLI** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use resplan::adapters::memory::InMemoryResourceCatalog;
//! use resplan::domain::models::{AllocationBehaviour, AllocationType, Scenario};
//! use resplan::domain::ports::Translator;
//! use resplan::services::AllocationSelector;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let (catalog, ratios) = InMemoryResourceCatalog::load_from_file("catalog.yaml")?;
//! let mut selector = AllocationSelector::new(
//!     Arc::new(catalog),
//!     Arc::new(ratios),
//!     AllocationBehaviour::NonLimiting,
//!     Scenario::master(),
//!     Translator::identity(),
//! );
//! selector.init().await?;
//! selector.set_allocation_type(AllocationType::GenericWorkers).await?;
//! println!("{}", selector.caption());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod importers;
pub mod infrastructure;
pub mod presentation;
pub mod services;

pub use domain::errors::{DomainError, DomainResult, ValidationError};
pub use domain::models::{
    AllocationBehaviour, AllocationType, Config, Configuration, Criterion, CriterionType,
    LoadRatios, OrderSequence, Resource, ResourceKind, ResourceWithLoadRatios,
};
pub use domain::ports::{
    LoadRatiosCalculator, MessageResolver, NewAllocationsAdder, ResourceSearcher, Translator,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AllocationSelector, ConfigurationConversation, CriterionTreeBuilder};

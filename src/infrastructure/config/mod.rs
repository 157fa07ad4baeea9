//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment: YAML files under `.resplan/`
//! with `RESPLAN_*` environment overrides.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

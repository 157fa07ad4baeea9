//! Infrastructure layer module
//!
//! Configuration loading, logging setup and message catalogs. Storage
//! adapters live under `crate::adapters`.

pub mod config;
pub mod logging;
pub mod messages;

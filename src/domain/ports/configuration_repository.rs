//! Configuration repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Configuration;

/// Repository interface for the singleton configuration record.
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// The stored configuration, if any.
    async fn get(&self) -> DomainResult<Option<Configuration>>;

    /// Insert or replace the configuration.
    async fn save(&self, configuration: &Configuration) -> DomainResult<()>;
}

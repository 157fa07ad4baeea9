//! Required-data bootstrap.
//!
//! Bootstraps make sure rows the application cannot run without exist. They
//! run at startup (and from `resplan init`) and must be idempotent.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Configuration, OrderSequence};
use crate::domain::ports::{ConfigurationRepository, OrderSequenceRepository};

pub const DEFAULT_ORDER_SEQUENCE_PREFIX: &str = "ORDER";

#[async_trait]
pub trait DataBootstrap: Send + Sync {
    /// Creates whatever required data is missing.
    async fn load_required_data(&self) -> DomainResult<()>;
}

/// Creates the configuration record and an active order sequence.
pub struct ConfigurationBootstrap<C: ConfigurationRepository, O: OrderSequenceRepository> {
    configurations: Arc<C>,
    order_sequences: Arc<O>,
}

impl<C: ConfigurationRepository, O: OrderSequenceRepository> ConfigurationBootstrap<C, O> {
    pub fn new(configurations: Arc<C>, order_sequences: Arc<O>) -> Self {
        Self {
            configurations,
            order_sequences,
        }
    }
}

#[async_trait]
impl<C: ConfigurationRepository, O: OrderSequenceRepository> DataBootstrap for ConfigurationBootstrap<C, O> {
    async fn load_required_data(&self) -> DomainResult<()> {
        if self.configurations.get().await?.is_none() {
            self.configurations.save(&Configuration::create()).await?;
            info!("created default configuration");
        }

        if self.order_sequences.list().await?.is_empty() {
            let sequence = OrderSequence::new(DEFAULT_ORDER_SEQUENCE_PREFIX).activated();
            self.order_sequences.save(&sequence).await?;
            info!(prefix = DEFAULT_ORDER_SEQUENCE_PREFIX, "created default order sequence");
        }
        Ok(())
    }
}

/// Runs every bootstrap in order, stopping at the first failure.
pub async fn run_bootstraps(bootstraps: &[&dyn DataBootstrap]) -> DomainResult<()> {
    for bootstrap in bootstraps {
        bootstrap.load_required_data().await?;
    }
    Ok(())
}

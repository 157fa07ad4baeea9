//! Load ratios calculator port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::errors::DomainResult;
use crate::domain::models::{LoadRatios, Resource, Scenario};

/// Computes availability and overtime for a resource over `[start, end)`.
#[async_trait]
pub trait LoadRatiosCalculator: Send + Sync {
    async fn calculate(
        &self,
        resource: &Resource,
        start: NaiveDate,
        end: NaiveDate,
        scenario: &Scenario,
    ) -> DomainResult<LoadRatios>;
}

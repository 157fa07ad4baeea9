//! Base calendar repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::BaseCalendar;

#[async_trait]
pub trait BaseCalendarRepository: Send + Sync {
    /// All base calendars ordered by name.
    async fn list(&self) -> DomainResult<Vec<BaseCalendar>>;

    async fn get(&self, id: Uuid) -> DomainResult<Option<BaseCalendar>>;

    async fn save(&self, calendar: &BaseCalendar) -> DomainResult<()>;
}

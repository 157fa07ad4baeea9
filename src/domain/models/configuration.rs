//! Installation-wide configuration record and base calendars.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Singleton configuration; one per installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: Uuid,
    pub default_calendar_id: Option<Uuid>,
    pub company_code: Option<String>,
    /// Generate criterion codes automatically instead of asking the user.
    pub generate_code_for_criterion: bool,
    /// Generate resource codes automatically instead of asking the user.
    pub generate_code_for_resources: bool,
}

impl Configuration {
    /// Defaults used when storage holds no configuration yet.
    pub fn create() -> Self {
        Self {
            id: Uuid::new_v4(),
            default_calendar_id: None,
            company_code: None,
            generate_code_for_criterion: true,
            generate_code_for_resources: true,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::create()
    }
}

/// A calendar that other calendars derive from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseCalendar {
    pub id: Uuid,
    pub name: String,
}

impl BaseCalendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

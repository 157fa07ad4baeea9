//! Cost category domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named rate bucket that resources are assigned to for costing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCategory {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub enabled: bool,
}

impl CostCategory {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Cost category name not specified".to_string());
        }
        if self.code.trim().is_empty() {
            return Err("Cost category code not specified".to_string());
        }
        Ok(())
    }
}

//! Message catalogs.
//!
//! A catalog is a YAML map of locale to message id to translation:
//!
//! ```yaml
//! es:
//!   "Start filtering date cannot be empty": "La fecha de inicio no puede estar vacía"
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::models::MessagesConfig;
use crate::domain::ports::{MessageResolver, Translator};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read message catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid message catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default)]
pub struct YamlCatalogResolver {
    entries: HashMap<String, HashMap<String, String>>,
}

impl YamlCatalogResolver {
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            entries: serde_yaml::from_str(yaml)?,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl MessageResolver for YamlCatalogResolver {
    fn lookup(&self, locale: &str, msgid: &str) -> Option<String> {
        self.entries.get(locale)?.get(msgid).cloned()
    }
}

/// Builds the translator for the configured locale and catalog.
pub fn translator_for(config: &MessagesConfig) -> Result<Translator, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = YamlCatalogResolver::load(path)?;
            tracing::debug!(path = %path, locale = %config.locale, "loaded message catalog");
            Ok(Translator::new(Arc::new(catalog), config.locale.clone()))
        }
        None => Ok(Translator::new(
            Arc::new(crate::domain::ports::IdentityResolver),
            config.locale.clone(),
        )),
    }
}

//! CLI command implementations.

pub mod config;
pub mod cost_category;
pub mod init;
pub mod resources;
pub mod sequence;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::sqlite::{
    initialize_database, SqliteBaseCalendarRepository, SqliteConfigurationRepository,
    SqliteOrderSequenceRepository,
};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::messages::translator_for;
use crate::services::{run_bootstraps, ConfigurationBootstrap, ConfigurationConversation};

pub type SqliteConversation = ConfigurationConversation<
    SqliteConfigurationRepository,
    SqliteOrderSequenceRepository,
    SqliteBaseCalendarRepository,
>;

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Opens the database and makes sure required records exist.
pub async fn open_database(config: &Config) -> Result<SqlitePool> {
    let pool = initialize_database(&config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;

    let bootstrap = ConfigurationBootstrap::new(
        Arc::new(SqliteConfigurationRepository::new(pool.clone())),
        Arc::new(SqliteOrderSequenceRepository::new(pool.clone())),
    );
    run_bootstraps(&[&bootstrap]).await.context("Failed to load required data")?;
    Ok(pool)
}

/// A started configuration conversation over `pool`.
pub async fn start_conversation(config: &Config, pool: &SqlitePool) -> Result<SqliteConversation> {
    let translator = translator_for(&config.messages)?;
    let mut conversation = ConfigurationConversation::new(
        Arc::new(SqliteConfigurationRepository::new(pool.clone())),
        Arc::new(SqliteOrderSequenceRepository::new(pool.clone())),
        Arc::new(SqliteBaseCalendarRepository::new(pool.clone())),
        translator,
    );
    conversation.init().await?;
    Ok(conversation)
}

/// Resolves a full id or a unique prefix of one among `candidates`.
pub fn resolve_id(input: &str, candidates: impl IntoIterator<Item = uuid::Uuid>) -> Result<uuid::Uuid> {
    let input = input.trim();
    if input.is_empty() {
        anyhow::bail!("An id or id prefix is required");
    }
    if let Ok(id) = uuid::Uuid::parse_str(input) {
        return Ok(id);
    }
    let matches: Vec<uuid::Uuid> = candidates
        .into_iter()
        .filter(|id| id.to_string().starts_with(&input.to_lowercase()))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => anyhow::bail!("No record matches id '{input}'"),
        _ => anyhow::bail!("Id prefix '{input}' is ambiguous ({} matches)", matches.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_resolve_id_by_prefix() {
        let a = Uuid::parse_str("aaaaaaaa-0000-0000-0000-000000000001").unwrap();
        let b = Uuid::parse_str("bbbbbbbb-0000-0000-0000-000000000002").unwrap();
        assert_eq!(resolve_id("AAAA", [a, b]).unwrap(), a);
        assert_eq!(resolve_id(&b.to_string(), [a]).unwrap(), b);
        assert!(resolve_id("cc", [a, b]).is_err());
        assert!(resolve_id("", [a, b]).is_err());
    }

    #[test]
    fn test_resolve_id_rejects_empty_input() {
        let only = Uuid::parse_str("aaaaaaaa-0000-0000-0000-000000000001").unwrap();
        assert!(resolve_id("", [only]).is_err());
        assert!(resolve_id("  ", [only]).is_err());
    }
}

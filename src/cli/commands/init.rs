//! `resplan init`

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::loader::PROJECT_CONFIG;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml with defaults
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub config_path: PathBuf,
    pub config_written: bool,
    pub database_path: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["resplan initialized.".to_string()];
        if self.config_written {
            lines.push(format!("Wrote default configuration to {}", self.config_path.display()));
        } else {
            lines.push(format!("Kept existing configuration at {}", self.config_path.display()));
        }
        lines.push(format!("Database ready at {}", self.database_path));
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let config_path = PathBuf::from(PROJECT_CONFIG);
    let config_written = write_default_config(&config_path, args.force).await?;

    open_database(config).await?;

    output(
        &InitOutput {
            config_path,
            config_written,
            database_path: config.database.path.clone(),
        },
        json_mode,
    );
    Ok(())
}

async fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(&Config::default())?;
    fs::write(path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

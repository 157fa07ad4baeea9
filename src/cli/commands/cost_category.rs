//! `resplan cost-category`

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{open_database, resolve_id};
use crate::adapters::sqlite::SqliteCostCategoryRepository;
use crate::cli::output::{list_table, output, render_list, short_id, CommandOutput};
use crate::domain::models::{Config, CostCategory};
use crate::domain::ports::CostCategoryRepository;

#[derive(Args, Debug)]
pub struct CostCategoryArgs {
    #[command(subcommand)]
    pub command: CostCategoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum CostCategoryCommands {
    /// List cost categories
    List {
        /// Only enabled categories
        #[arg(long)]
        active: bool,
    },
    /// Add a cost category
    Add { code: String, name: String },
    /// Enable or disable a cost category
    SetEnabled {
        /// Category id or id prefix
        id: String,
        enabled: bool,
    },
    /// Remove a cost category
    Remove {
        /// Category id or id prefix
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct CostCategoryListOutput {
    pub cost_categories: Vec<CostCategory>,
}

impl CommandOutput for CostCategoryListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "code", "name", "enabled"]);
        for category in &self.cost_categories {
            table.add_row(vec![
                short_id(&category.id),
                category.code.clone(),
                category.name.clone(),
                if category.enabled { "yes" } else { "no" }.to_string(),
            ]);
        }
        render_list("cost category", "cost categories", &table, self.cost_categories.len())
    }
}

pub async fn execute(args: CostCategoryArgs, config: &Config, json_mode: bool) -> Result<()> {
    let repo = SqliteCostCategoryRepository::new(open_database(config).await?);

    let cost_categories = match args.command {
        CostCategoryCommands::List { active: true } => repo.find_active().await?,
        CostCategoryCommands::List { active: false } => repo.list().await?,
        CostCategoryCommands::Add { code, name } => {
            repo.create(&CostCategory::new(code, name)).await?;
            repo.list().await?
        }
        CostCategoryCommands::SetEnabled { id, enabled } => {
            let all = repo.list().await?;
            let id = resolve_id(&id, all.iter().map(|c| c.id))?;
            if let Some(mut category) = repo.get(id).await? {
                category.enabled = enabled;
                repo.update(&category).await?;
            } else {
                anyhow::bail!("Cost category {id} not found");
            }
            repo.list().await?
        }
        CostCategoryCommands::Remove { id } => {
            let all = repo.list().await?;
            let id = resolve_id(&id, all.iter().map(|c| c.id))?;
            repo.remove(id).await?;
            repo.list().await?
        }
    };

    output(&CostCategoryListOutput { cost_categories }, json_mode);
    Ok(())
}

//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::config::ConfigArgs;
use commands::cost_category::CostCategoryArgs;
use commands::init::InitArgs;
use commands::resources::ResourcesArgs;
use commands::sequence::SequenceArgs;

#[derive(Parser, Debug)]
#[command(name = "resplan")]
#[command(about = "Resource allocation and project configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file, replacing the .resplan/ lookup
    #[arg(long, global = true, env = "RESPLAN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .resplan/, the database and required records
    Init(InitArgs),
    /// Show or change the company configuration
    Config(ConfigArgs),
    /// Manage order code sequences
    Sequence(SequenceArgs),
    /// Manage cost categories
    CostCategory(CostCategoryArgs),
    /// Search resources the way the allocation selector does
    Resources(ResourcesArgs),
}

/// Prints `err` and exits with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1)
}

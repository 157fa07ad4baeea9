//! resplan CLI entry point.

use clap::Parser;

use resplan::cli::commands::{self, load_config};
use resplan::cli::{handle_error, Cli, Commands};
use resplan::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, cli.json).await,
        Commands::Config(args) => commands::config::execute(args, &config, cli.json).await,
        Commands::Sequence(args) => commands::sequence::execute(args, &config, cli.json).await,
        Commands::CostCategory(args) => commands::cost_category::execute(args, &config, cli.json).await,
        Commands::Resources(args) => commands::resources::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}

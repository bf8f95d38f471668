//! Plansync CLI entry point.

use clap::Parser;

use plansync::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command.unwrap_or_default() {
        Commands::Sync(args) => plansync::cli::commands::sync::execute(args, cli.json, config_path).await,
        Commands::Parse(args) => plansync::cli::commands::parse::execute(args, cli.json, config_path).await,
        Commands::Labels => plansync::cli::commands::labels::execute(cli.json),
    };

    if let Err(err) = result {
        plansync::cli::handle_error(err, cli.json);
    }
}

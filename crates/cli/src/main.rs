//! sobject CLI
//!
//! Main entry point for the sobject command-line tool.
//! Scaffolds Salesforce metadata (custom fields, relationship fields and
//! custom tabs) into a local Salesforce DX project.

mod commands;

use clap::{Parser, Subcommand};
use commands::GenerateCommand;
use sobject_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// sobject - scaffold Salesforce metadata from the command line
#[derive(Parser, Debug)]
#[command(name = "sobject")]
#[command(about = "Scaffold Salesforce metadata from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory inside the Salesforce DX project (default: current directory)
    #[arg(short, long, global = true, env = "SOBJECT_PROJECT")]
    project: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "SOBJECT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate local metadata files
    Generate(GenerateCommand),
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load_from(cli.project, cli.config)?.with_overrides(
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("sobject CLI starting");
    tracing::debug!("Project: {:?}", config.project);

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Generate(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Generate(cmd) => cmd.name(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

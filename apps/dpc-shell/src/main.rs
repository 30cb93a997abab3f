use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dpc_shell::{AppConfig, CliOverrides, logging};

/// TestDPC shell - run device policy commands against a simulated device
#[derive(Parser)]
#[command(name = "dpc-shell")]
#[command(about = "TestDPC shell - run device policy commands against a simulated device")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Address the parent profile of the managed profile
    #[arg(long)]
    parent_profile: bool,

    /// Command and its arguments; run `help` to list commands
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (DPC__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        verbose: cli.verbose,
        parent_profile: cli.parent_profile,
    });

    logging::init_logging(&config.logging);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    tracing::info!(tokens = cli.tokens.len(), "dpc-shell starting");
    dpc_shell::run(&config, &cli.tokens, io::stdout().lock())?;
    Ok(())
}

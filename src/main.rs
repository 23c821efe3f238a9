//! Cura profile CLI
//!
//! Command-line interface for validating, importing and exporting Cura profiles.

use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use cura_profile::cli::commands;
use cura_profile::cli::{Cli, Commands};
use cura_profile::Result;

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("cura-profile v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{} [{}]", e, e.error_code());
            if let Some(suggestion) = e.recovery_suggestion() {
                eprintln!("{}", suggestion);
            }
            std::process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when the command ran but the profile was invalid.
fn run(cli: Cli) -> Result<bool> {
    let registry = commands::build_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { path } => {
            commands::parse_file(&path)?;
        }
        Commands::Validate { path } => {
            let format = registry.get(&cli.format)?;
            let result = commands::validate_file(format.as_ref(), &path)?;
            return Ok(result.is_valid);
        }
        Commands::Import { path, compact } => {
            let format = registry.get(&cli.format)?;
            commands::import_file(format.as_ref(), &path, compact)?;
        }
        Commands::Export { snapshot, output } => {
            let format = registry.get(&cli.format)?;
            commands::export_snapshot(format.as_ref(), &snapshot, output.as_deref())?;
        }
        Commands::Formats => commands::list_formats(&registry),
    }

    Ok(true)
}

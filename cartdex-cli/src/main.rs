//! cartdex CLI
//!
//! Command-line interface for cataloging NDS, DSi and GBA ROMs.

mod cli_types;
mod commands;
mod error;
mod logger;
mod spinner;

use clap::Parser;

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Build(args) => commands::build::run_build(args, cli.root, cli.quiet),
        Commands::Inspect {
            files,
            platform,
            json,
        } => commands::inspect::run_inspect(files, platform, json, cli.root),
        Commands::Import { file, dsi } => commands::library::run_import(&file, dsi, cli.root),
        Commands::Remove { file } => commands::library::run_remove(&file),
        Commands::List => {
            commands::list::run_list();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.root),
            ConfigAction::SetBaseUrl { url } => commands::config::run_config_set_base_url(&url),
            ConfigAction::SetDelimiter { delimiter } => {
                commands::config::run_config_set_delimiter(&delimiter)
            }
            ConfigAction::SetRoot { path } => commands::config::run_config_set_root(path),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cartdex_lib::Platform;

#[derive(Parser)]
#[command(name = "cartdex")]
#[command(about = "Catalog NDS, DSi and GBA ROMs for a Kekatsu-style download frontend", long_about = None)]
pub(crate) struct Cli {
    /// Library root containing roms/, boxarts/ and dbnames/ (defaults to the
    /// saved root, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `build` command.
#[derive(Args, Clone)]
pub(crate) struct BuildArgs {
    /// Fast mode: only use boxart already in the cache (no network)
    #[arg(short, long)]
    pub fast: bool,

    /// Keep original file names for official ROMs
    #[arg(long)]
    pub no_rename: bool,

    /// Console names or aliases (e.g., nds,gba,dsi)
    #[arg(short, long, value_delimiter = ',')]
    pub consoles: Option<Vec<Platform>>,

    /// Catalog destination (defaults to the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan the library, resolve boxart and write the catalog
    Build(BuildArgs),

    /// Show decoded header metadata and classification for ROM files
    Inspect {
        /// ROM files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Platform to decode as (auto-detected from the header otherwise)
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Copy a ROM into the library
    Import {
        /// ROM file to import
        file: PathBuf,

        /// Treat an .nds file as DSiWare
        #[arg(long)]
        dsi: bool,
    },

    /// Delete a ROM from the library
    Remove {
        /// ROM file to delete
        file: PathBuf,
    },

    /// List all supported consoles
    List,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Set the base URL the catalog's ROM and boxart links point at
    SetBaseUrl { url: String },

    /// Set the catalog field delimiter (`\t` is accepted for a tab)
    SetDelimiter { delimiter: String },

    /// Save a library root used when --root is not given
    SetRoot { path: PathBuf },

    /// Print the settings file path
    Path,
}

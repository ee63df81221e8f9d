use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartdex_lib::{Settings, settings_path};

use crate::error::CliError;

/// Accept `\t` for a tab, since a literal tab is awkward to type.
fn unescape_delimiter(raw: &str) -> String {
    raw.replace("\\t", "\t")
}

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show(root: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();
    let settings = Settings::load()?;

    println!(
        "{}",
        "cartdex Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();
    if path.exists() {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let paths = settings.library.paths(&settings.resolve_root(root));
    let options = settings.export.options();
    println!();
    println!("  Library root:   {}", paths.root.display());
    println!("  ROMs:           {}", paths.roms.display());
    println!("  Boxart cache:   {}", paths.boxarts.display());
    println!("  Listings:       {}", paths.listings.display());
    println!("  Catalog output: {}", paths.output.display());
    println!();
    println!("  ROM base URL:    {}", options.rom_base_url);
    println!("  Boxart base URL: {}", options.boxart_base_url);
    println!("  Delimiter:       {:?}", options.delimiter);
    println!();
    println!("  Primary art host:   {}", settings.boxart.primary_base);
    println!("  Secondary art host: {}", settings.boxart.secondary_base);
    println!(
        "  HQ variants: {}, standard height: {}px",
        if settings.boxart.hq { "yes" } else { "no" },
        settings.boxart.standard_height
    );
    if !settings.makers.is_empty() {
        println!();
        println!("  Maker overrides:");
        for (code, name) in &settings.makers {
            println!("    {code} = {name}");
        }
    }
    Ok(())
}

pub(crate) fn run_config_set_base_url(url: &str) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    settings.set_base_url(url)?;
    settings.save()?;
    log::info!("Base URL set to {}", settings.export.base_url);
    Ok(())
}

pub(crate) fn run_config_set_delimiter(raw: &str) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    settings.set_delimiter(&unescape_delimiter(raw))?;
    settings.save()?;
    log::info!("Delimiter set to {:?}", settings.export.delimiter);
    Ok(())
}

pub(crate) fn run_config_set_root(path: PathBuf) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    let path = std::fs::canonicalize(&path).unwrap_or(path);
    log::info!("Library root set to {}", path.display());
    settings.library.root = Some(path);
    settings.save()?;
    Ok(())
}

pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

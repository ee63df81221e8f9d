use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cartdex_lib::library::{import_rom, platform_for_import, remove_rom};

use crate::commands::load_library;
use crate::error::CliError;

pub(crate) fn run_import(file: &Path, dsi: bool, root: Option<PathBuf>) -> Result<(), CliError> {
    let (_, paths) = load_library(root)?;
    let platform = platform_for_import(file, dsi);
    let target = import_rom(file, &paths.roms, platform)?;
    log::info!(
        "Imported {} as {} ({})",
        file.display(),
        target.display().if_supports_color(Stderr, |t| t.cyan()),
        platform.short_name(),
    );
    Ok(())
}

pub(crate) fn run_remove(file: &Path) -> Result<(), CliError> {
    remove_rom(file)?;
    log::info!("Removed {}", file.display());
    Ok(())
}

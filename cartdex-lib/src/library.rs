//! Adding ROMs to and removing them from the library folders.

use std::fs;
use std::path::{Path, PathBuf};

use cartdex_core::Platform;

use crate::error::LibraryError;
use crate::rename::{normalize, unique_target};

/// Platform folder an imported file belongs in: `.gba` goes to GBA,
/// `.dsi` files or an explicit DSiWare flag go to DSi, the rest to NDS.
pub fn platform_for_import(path: &Path, dsi: bool) -> Platform {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "gba" => Platform::Gba,
        "dsi" => Platform::Dsi,
        _ if dsi => Platform::Dsi,
        _ => Platform::Nds,
    }
}

/// Copy `source` into `roms_root/{platform}/` under a sanitized,
/// collision-free name. Returns the new path.
pub fn import_rom(source: &Path, roms_root: &Path, platform: Platform) -> Result<PathBuf, LibraryError> {
    if !source.is_file() {
        return Err(LibraryError::NotAFile(source.to_path_buf()));
    }
    let dir = roms_root.join(platform.short_name());
    fs::create_dir_all(&dir)?;

    let name = source
        .file_name()
        .map(|n| normalize(&n.to_string_lossy()))
        .unwrap_or_else(|| normalize(""));
    let target = unique_target(&dir, &name, None)?;
    fs::copy(source, &target)?;
    log::info!("Imported {} -> {}", source.display(), target.display());
    Ok(target)
}

/// Delete a ROM file from the library.
pub fn remove_rom(path: &Path) -> Result<(), LibraryError> {
    if !path.is_file() {
        return Err(LibraryError::NotAFile(path.to_path_buf()));
    }
    fs::remove_file(path)?;
    log::info!("Removed {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/library_tests.rs"]
mod tests;

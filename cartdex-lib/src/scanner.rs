//! Library scanner: one subdirectory per platform, ROMs directly inside.

use std::path::Path;

use cartdex_core::Platform;

use crate::pipeline::RomTask;

/// Platform whose short name or alias matches a folder name
/// (case-insensitive).
pub fn platform_for_folder(folder_name: &str) -> Option<Platform> {
    let folder_lower = folder_name.to_lowercase();
    Platform::all()
        .iter()
        .copied()
        .find(|p| p.aliases().iter().any(|a| *a == folder_lower))
}

/// Whether `path` has one of `extensions` (case-insensitive).
pub fn has_matching_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Enumerate ROMs under `roms_root`, sorted by path.
///
/// Only files directly inside a recognized platform folder with one of the
/// platform's extensions are returned. `filter` restricts the platforms.
pub fn scan_library(roms_root: &Path, filter: Option<&[Platform]>) -> std::io::Result<Vec<RomTask>> {
    let mut tasks = Vec::new();

    for entry in std::fs::read_dir(roms_root)?.flatten() {
        let folder = entry.path();
        if !folder.is_dir() {
            continue;
        }
        let Some(platform) = folder
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(platform_for_folder)
        else {
            continue;
        };
        if filter.is_some_and(|f| !f.contains(&platform)) {
            continue;
        }

        let files = match std::fs::read_dir(&folder) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot read {}: {}", folder.display(), e);
                continue;
            }
        };
        for file in files.flatten() {
            let path = file.path();
            if path.is_file() && has_matching_extension(&path, platform.file_extensions()) {
                tasks.push(RomTask::new(path, platform));
            }
        }
    }

    tasks.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(tasks)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;

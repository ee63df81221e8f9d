//! Filename sanitization and collision-safe renames.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenameError;

/// Stem used when sanitizing leaves nothing.
pub const EMPTY_STEM: &str = "untitled";

/// Highest numeric suffix tried before giving up.
pub const MAX_SUFFIX: u32 = 9999;

/// Spaces become `_`, anything outside `[A-Za-z0-9_]` is dropped, the
/// result is lowercased.
pub fn normalize_stem(text: &str) -> String {
    let stem: String = text
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if stem.is_empty() {
        EMPTY_STEM.to_string()
    } else {
        stem
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Sanitize a whole file name. Idempotent.
pub fn normalize(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => {
            let stem = normalize_stem(stem);
            let ext = normalize_extension(ext);
            if ext.is_empty() {
                stem
            } else {
                format!("{stem}.{ext}")
            }
        }
        None => normalize_stem(file_name),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn with_suffix(file_name: &str, n: u32) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{file_name}_{n}"),
    }
}

/// First free path among `name.ext`, `name_1.ext`, `name_2.ext`, …
///
/// A candidate that is `source` itself counts as free, so re-running on an
/// already renamed file is a no-op.
pub fn unique_target(
    dir: &Path,
    file_name: &str,
    source: Option<&Path>,
) -> Result<PathBuf, RenameError> {
    let is_free = |candidate: &Path| {
        !candidate.exists() || source.is_some_and(|s| same_file(s, candidate))
    };

    let first = dir.join(file_name);
    if is_free(&first) {
        return Ok(first);
    }
    for n in 1..=MAX_SUFFIX {
        let candidate = dir.join(with_suffix(file_name, n));
        if is_free(&candidate) {
            return Ok(candidate);
        }
    }
    Err(RenameError::Collision {
        dir: dir.to_path_buf(),
        name: file_name.to_string(),
        attempts: MAX_SUFFIX,
    })
}

/// Rename `path` to `normalize_stem(title).ext` in the same directory,
/// adding a numeric suffix on collision. Never overwrites.
///
/// Returns the new path, which equals `path` when the file already has its
/// catalog name.
pub fn rename_for_catalog(path: &Path, canonical_title: &str) -> Result<PathBuf, RenameError> {
    let dir = path
        .parent()
        .ok_or_else(|| RenameError::NoParent(path.to_path_buf()))?;
    let ext = path
        .extension()
        .map(|e| normalize_extension(&e.to_string_lossy()))
        .unwrap_or_default();
    let stem = normalize_stem(canonical_title);
    let file_name = if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    };

    let target = unique_target(dir, &file_name, Some(path))?;
    if target.file_name() == path.file_name() {
        return Ok(path.to_path_buf());
    }
    fs::rename(path, &target)?;
    Ok(target)
}

#[cfg(test)]
#[path = "tests/rename_tests.rs"]
mod tests;

pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod inspect;
pub(crate) mod library;
pub(crate) mod list;

use std::path::PathBuf;

use cartdex_lib::{LibraryPaths, Settings};

use crate::error::CliError;

/// Load settings and resolve library locations against the effective root.
pub(crate) fn load_library(root: Option<PathBuf>) -> Result<(Settings, LibraryPaths), CliError> {
    let settings = Settings::load()?;
    let root = settings.resolve_root(root);
    let paths = settings.library.paths(&root);
    Ok((settings, paths))
}

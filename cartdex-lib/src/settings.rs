//! Persisted settings: `~/.config/cartdex/settings.toml`.
//!
//! Every field has a default, so a missing or partial file is fine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cartdex_core::MakerCodes;
use cartdex_nintendo::builtin_maker_codes;
use serde::{Deserialize, Serialize};

use crate::boxart::{BoxartConfig, DEFAULT_PRIMARY_BASE, DEFAULT_SECONDARY_BASE, DEFAULT_STANDARD_HEIGHT};
use crate::error::SettingsError;
use crate::export::{DEFAULT_BASE_URL, DEFAULT_DELIMITER, ExportOptions, normalize_base_url, validate_delimiter};

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cartdex").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub export: ExportSettings,
    pub boxart: BoxartSettings,
    /// Maker-code overrides and additions
    pub makers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Saved library root, used when no `--root` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// The remaining paths are relative to the library root
    pub roms_dir: PathBuf,
    pub boxart_dir: PathBuf,
    pub listings_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            roms_dir: PathBuf::from("roms"),
            boxart_dir: PathBuf::from("boxarts"),
            listings_dir: PathBuf::from("dbnames"),
            output: PathBuf::from("database.txt"),
        }
    }
}

/// Absolute library locations after resolving against a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    pub root: PathBuf,
    pub roms: PathBuf,
    pub boxarts: PathBuf,
    pub listings: PathBuf,
    pub output: PathBuf,
}

impl LibrarySettings {
    pub fn paths(&self, root: &Path) -> LibraryPaths {
        LibraryPaths {
            root: root.to_path_buf(),
            roms: root.join(&self.roms_dir),
            boxarts: root.join(&self.boxart_dir),
            listings: root.join(&self.listings_dir),
            output: root.join(&self.output),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rom_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxart_base_url: Option<String>,
    pub delimiter: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rom_base_url: None,
            boxart_base_url: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn options(&self) -> ExportOptions {
        let mut options = ExportOptions::from_base_url(&self.base_url).with_delimiter(&self.delimiter);
        if let Some(url) = &self.rom_base_url {
            options.rom_base_url = normalize_base_url(url);
        }
        if let Some(url) = &self.boxart_base_url {
            options.boxart_base_url = normalize_base_url(url);
        }
        options
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxartSettings {
    pub primary_base: String,
    pub secondary_base: String,
    pub hq: bool,
    pub standard_height: u32,
}

impl Default for BoxartSettings {
    fn default() -> Self {
        Self {
            primary_base: DEFAULT_PRIMARY_BASE.to_string(),
            secondary_base: DEFAULT_SECONDARY_BASE.to_string(),
            hq: true,
            standard_height: DEFAULT_STANDARD_HEIGHT,
        }
    }
}

impl BoxartSettings {
    pub fn config(&self, root: impl Into<PathBuf>) -> BoxartConfig {
        BoxartConfig {
            root: root.into(),
            primary_base: self.primary_base.clone(),
            secondary_base: self.secondary_base.clone(),
            hq: self.hq,
            standard_height: self.standard_height,
        }
    }
}

impl Settings {
    /// Load from [`settings_path`]. A missing file yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&settings_path())
    }

    /// Write atomically through a temporary file.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Built-in maker table with `[makers]` applied on top.
    pub fn maker_codes(&self) -> MakerCodes {
        let mut makers = builtin_maker_codes();
        for (code, name) in &self.makers {
            makers.insert(code, name.clone());
        }
        makers
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<(), SettingsError> {
        let url = normalize_base_url(url);
        if url.is_empty() {
            return Err(SettingsError::Invalid("base URL must not be empty".to_string()));
        }
        self.export.base_url = url;
        Ok(())
    }

    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<(), SettingsError> {
        validate_delimiter(delimiter).map_err(|e| SettingsError::Invalid(e.to_string()))?;
        self.export.delimiter = delimiter.to_string();
        Ok(())
    }

    /// Library root: CLI override, then the saved root, then the current
    /// directory.
    pub fn resolve_root(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(p) = cli_override {
            return p;
        }
        if let Some(p) = &self.library.root {
            return p.clone();
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

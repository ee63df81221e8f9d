//! Per-platform serial → title reference mapping built from listings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cartdex_core::Platform;
use cartdex_core::util::normalize_serial;

use crate::error::ListingError;
use crate::listing::{Listing, parse_listing_file};

/// Cartridge serial prefixes that wrap a 4-character game code.
const SERIAL_PREFIXES: &[&str] = &["NTR", "TWL", "AGB"];

/// Authoritative reference of officially released titles, keyed by
/// platform and normalized serial.
///
/// Built once before a batch and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    platforms: HashMap<Platform, HashMap<String, String>>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of a platform's listing inside a listings directory.
    pub fn listing_path(dir: &Path, platform: Platform) -> PathBuf {
        dir.join(format!("{}.dat", platform.short_name()))
    }

    /// Load `{short_name}.dat` for every supported platform from `dir`.
    pub fn load_dir(dir: &Path) -> Self {
        let files: Vec<(Platform, PathBuf)> = Platform::all()
            .iter()
            .map(|&p| (p, Self::listing_path(dir, p)))
            .collect();
        Self::load(&files)
    }

    /// Load explicit listing files. A missing or malformed listing leaves
    /// that platform's mapping empty.
    pub fn load(files: &[(Platform, PathBuf)]) -> Self {
        let mut catalog = Self::new();
        for (platform, path) in files {
            match catalog.load_platform(*platform, path) {
                Ok(count) => log::debug!(
                    "Loaded {} reference serials for {} from {}",
                    count,
                    platform.short_name(),
                    path.display()
                ),
                Err(e) => log::warn!(
                    "Reference listing for {} unavailable ({}): {}",
                    platform.short_name(),
                    path.display(),
                    e
                ),
            }
        }
        catalog
    }

    /// Parse one listing file and add its entries. On error the platform
    /// keeps no entries from this file.
    pub fn load_platform(&mut self, platform: Platform, path: &Path) -> Result<usize, ListingError> {
        let listing = parse_listing_file(path)?;
        if !listing.name.is_empty() {
            log::debug!("Reading listing \"{}\" ({} entries)", listing.name, listing.entries.len());
        }
        Ok(self.add_listing(platform, &listing))
    }

    /// Add every serial of a parsed listing. Returns the number of serials
    /// registered.
    pub fn add_listing(&mut self, platform: Platform, listing: &Listing) -> usize {
        let mut count = 0;
        for entry in &listing.entries {
            for raw in &entry.serials {
                for serial in listing_serials(raw) {
                    self.insert(platform, &serial, &entry.name);
                    count += 1;
                }
            }
        }
        count
    }

    /// Register a serial. Later inserts for the same serial overwrite.
    pub fn insert(&mut self, platform: Platform, serial: &str, title: &str) {
        let key = normalize_serial(serial);
        if key.is_empty() {
            return;
        }
        self.platforms
            .entry(platform)
            .or_default()
            .insert(key, title.to_string());
    }

    /// Canonical title for a serial. An entry may carry an empty title.
    pub fn lookup(&self, platform: Platform, serial: &str) -> Option<&str> {
        let key = normalize_serial(serial);
        self.platforms
            .get(&platform)
            .and_then(|m| m.get(&key))
            .map(String::as_str)
    }

    pub fn contains(&self, platform: Platform, serial: &str) -> bool {
        self.lookup(platform, serial).is_some()
    }

    pub fn len(&self, platform: Platform) -> usize {
        self.platforms.get(&platform).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.values().all(HashMap::is_empty)
    }
}

/// Split a listing's serial attribute into normalized lookup keys.
///
/// `NTR-ADAE-USA`, `TWL-KQ9E` and `AGB-BPEE-EUR` reduce to their game code;
/// anything else is hyphen-stripped and uppercased.
pub fn listing_serials(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let parts: Vec<&str> = s.split('-').map(str::trim).collect();
            if parts.len() >= 2
                && SERIAL_PREFIXES
                    .iter()
                    .any(|p| parts[0].eq_ignore_ascii_case(p))
                && parts[1].len() == 4
            {
                parts[1].to_ascii_uppercase()
            } else {
                normalize_serial(s)
            }
        })
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;

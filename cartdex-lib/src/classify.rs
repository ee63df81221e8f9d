//! Official vs homebrew decision and canonical title selection.

use std::path::Path;

use cartdex_core::util::{normalize_serial, sanitize_text};
use cartdex_core::{Platform, UNKNOWN_TITLE};
use cartdex_dat::ReferenceCatalog;
use serde::{Deserialize, Serialize};

/// Whether a ROM is a known commercial release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Official,
    Homebrew,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Official => "Official",
            Self::Homebrew => "Homebrew",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Official iff the serial is non-empty and listed for this platform.
pub fn classify(serial: &str, platform: Platform, catalog: &ReferenceCatalog) -> Classification {
    let serial = normalize_serial(serial);
    if !serial.is_empty() && catalog.contains(platform, &serial) {
        Classification::Official
    } else {
        Classification::Homebrew
    }
}

/// Title that goes into the catalog record.
///
/// Official records use the reference title, or the header title when the
/// reference entry has none. Homebrew records use the header title, or the
/// file stem when the header carries no usable title.
pub fn canonical_title(
    classification: Classification,
    serial: &str,
    platform: Platform,
    header_title: &str,
    file_name: &str,
    catalog: &ReferenceCatalog,
) -> String {
    let header = sanitize_text(header_title);
    match classification {
        Classification::Official => {
            let reference = catalog
                .lookup(platform, serial)
                .map(sanitize_text)
                .unwrap_or_default();
            if !reference.is_empty() {
                reference
            } else if !header.is_empty() {
                header
            } else {
                UNKNOWN_TITLE.to_string()
            }
        }
        Classification::Homebrew => {
            if header.is_empty() || header == UNKNOWN_TITLE {
                let stem = Path::new(file_name)
                    .file_stem()
                    .map(|s| sanitize_text(&s.to_string_lossy()))
                    .unwrap_or_default();
                if stem.is_empty() {
                    UNKNOWN_TITLE.to_string()
                } else {
                    stem
                }
            } else {
                header
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Cartridge platforms handled by the catalog.
///
/// This enum centralizes platform identity (folder tokens, display names,
/// file extensions and the path segments used by the art hosts) in one
/// place, replacing ad-hoc string matching throughout the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Nds,
    Gba,
    Dsi,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[Platform::Nds, Platform::Gba, Platform::Dsi];

impl Platform {
    /// Canonical short name used for folder paths, listing files and the
    /// exported catalog.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Nds => "nds",
            Self::Gba => "gba",
            Self::Dsi => "dsi",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nds => "Nintendo DS",
            Self::Gba => "Game Boy Advance",
            Self::Dsi => "Nintendo DSi",
        }
    }

    /// All accepted names for this platform (case-insensitive matching).
    ///
    /// Includes the canonical short name plus any common alternatives
    /// used for folder names, CLI arguments, etc.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Nds => &["nds", "ds", "nintendo ds"],
            Self::Gba => &["gba", "game boy advance", "gameboy advance"],
            Self::Dsi => &["dsi", "dsiware", "nintendo dsi"],
        }
    }

    /// File extensions accepted inside this platform's library folder.
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Nds => &["nds"],
            Self::Gba => &["gba"],
            Self::Dsi => &["nds", "dsi"],
        }
    }

    /// GameTDB artwork segment, for platforms GameTDB covers.
    pub fn gametdb_segment(&self) -> Option<&'static str> {
        match self {
            Self::Nds => Some("ds"),
            Self::Gba | Self::Dsi => None,
        }
    }

    /// libretro thumbnail system name (the No-Intro system name).
    pub fn libretro_system(&self) -> &'static str {
        match self {
            Self::Nds => "Nintendo - Nintendo DS",
            Self::Gba => "Nintendo - Game Boy Advance",
            Self::Dsi => "Nintendo - Nintendo DSi",
        }
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from any recognized name (case-insensitive).
    ///
    /// Matches against `short_name()` and all entries in `aliases()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;

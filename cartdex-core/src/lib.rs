use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};

pub mod error;
pub mod maker;
pub mod platform;
pub mod region;
pub mod util;

pub use error::HeaderError;
pub use maker::MakerCodes;
pub use platform::{Platform, PlatformParseError};
pub use region::Region;

/// Title used when a header yields no usable name.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Metadata decoded from a cartridge header.
///
/// Every field has a defined default, so a header that cannot be read still
/// produces a complete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    /// Internal or banner title
    pub title: String,
    /// Normalized game code (e.g. "ADAE"); empty when absent
    pub serial: String,
    /// Region derived from the game code
    pub region: Region,
    /// Publisher name resolved from the maker code
    pub author: String,
    /// Version string, "1.<revision>"
    pub version: String,
}

impl Default for HeaderMetadata {
    fn default() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            serial: String::new(),
            region: Region::Any,
            author: UNKNOWN_TITLE.to_string(),
            version: "1.0".to_string(),
        }
    }
}

impl HeaderMetadata {
    /// Format a revision byte the way the catalog expects it.
    pub fn version_from_revision(revision: u8) -> String {
        format!("1.{revision}")
    }
}

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Decodes one platform's cartridge header.
///
/// Implementors extract the catalog fields from fixed offsets. They should
/// be lenient: a short file yields whatever fields are present, with
/// defaults for the rest.
pub trait HeaderParser: Send + Sync {
    /// Returns the platform this parser handles.
    fn platform(&self) -> Platform;

    /// Returns file extensions commonly associated with this platform.
    fn file_extensions(&self) -> &'static [&'static str] {
        self.platform().file_extensions()
    }

    /// Check whether the first bytes of a file look like this platform's
    /// header (magic bytes only, no full decode).
    fn detect(&self, header: &[u8]) -> bool;

    /// Decode header metadata from a reader positioned anywhere in the file.
    ///
    /// # Arguments
    /// * `reader` - The ROM data
    /// * `makers` - Maker-code table used to resolve the author
    ///
    /// # Returns
    /// * `Ok(HeaderMetadata)` - Extracted metadata (missing fields defaulted)
    /// * `Err(HeaderError)` - The file could not be read at all
    fn parse(
        &self,
        reader: &mut dyn ReadSeek,
        makers: &MakerCodes,
    ) -> Result<HeaderMetadata, HeaderError>;
}

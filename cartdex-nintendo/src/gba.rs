//! Game Boy Advance header parser.
//!
//! Supports:
//! - GBA ROMs (.gba)
//!
//! The cartridge header occupies bytes 0x00–0xBF. Detection uses the
//! Nintendo logo at 0x04 and the fixed value 0x96 at 0xB2.

use std::io::{Read, SeekFrom};

use cartdex_core::util::{field, normalize_serial, read_ascii, read_latin1, sanitize_text};
use cartdex_core::{
    HeaderError, HeaderMetadata, HeaderParser, MakerCodes, Platform, ReadSeek, Region,
    UNKNOWN_TITLE,
};

use crate::ds::NINTENDO_LOGO;

/// Header size (0xC0).
const HEADER_SIZE: u64 = 0xC0;

/// Fixed value required at 0xB2.
pub(crate) const FIXED_VALUE: u8 = 0x96;

/// Header parser for Game Boy Advance ROMs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GbaParser;

impl GbaParser {
    pub fn new() -> Self {
        Self
    }
}

impl HeaderParser for GbaParser {
    fn platform(&self) -> Platform {
        Platform::Gba
    }

    fn detect(&self, header: &[u8]) -> bool {
        field(header, 0x04, 0x04 + NINTENDO_LOGO.len()) == NINTENDO_LOGO
            && header.get(0xB2) == Some(&FIXED_VALUE)
    }

    fn parse(
        &self,
        reader: &mut dyn ReadSeek,
        makers: &MakerCodes,
    ) -> Result<HeaderMetadata, HeaderError> {
        reader.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::with_capacity(HEADER_SIZE as usize);
        (&mut *reader).take(HEADER_SIZE).read_to_end(&mut buf)?;
        if buf.is_empty() {
            return Err(HeaderError::TooSmall {
                expected: HEADER_SIZE,
                actual: 0,
            });
        }

        // Title: 12 bytes at 0xA0
        let title = sanitize_text(&read_latin1(field(&buf, 0xA0, 0xAC)));
        // Game code: 4 bytes at 0xAC
        let serial = normalize_serial(&read_ascii(field(&buf, 0xAC, 0xB0)));
        // Maker code: 2 bytes at 0xB0
        let maker_code = read_ascii(field(&buf, 0xB0, 0xB2));
        // Software version at 0xBC
        let revision = buf.get(0xBC).copied().unwrap_or(0);

        Ok(HeaderMetadata {
            title: if title.is_empty() {
                UNKNOWN_TITLE.to_string()
            } else {
                title
            },
            region: Region::from_game_code(&serial),
            serial,
            author: sanitize_text(&makers.resolve(&maker_code)),
            version: HeaderMetadata::version_from_revision(revision),
        })
    }
}

#[cfg(test)]
#[path = "tests/gba_tests.rs"]
mod tests;

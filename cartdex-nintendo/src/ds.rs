//! Nintendo DS / DSi header parser.
//!
//! Supports:
//! - DS cartridges (.nds)
//! - DSiWare and DSi-exclusive titles (.nds, .dsi)
//!
//! The cartridge header occupies bytes 0x000–0x1FF. Detection uses the
//! 156-byte Nintendo logo at 0xC0 (identical to GBA) and the logo checksum
//! 0xCF56 at 0x15C; the unit code at 0x012 separates DSi-only software
//! (0x03) from everything else.
//!
//! Titles come from the plain header first. When the header points at an
//! icon/title banner (u32 at 0x068), the UTF-16LE title stored 0x240 bytes
//! into the banner replaces it.

use std::io::{Read, SeekFrom};

use cartdex_core::util::{
    field, normalize_serial, read_ascii, read_latin1, read_utf16le, sanitize_text,
};
use cartdex_core::{
    HeaderError, HeaderMetadata, HeaderParser, MakerCodes, Platform, ReadSeek, Region,
    UNKNOWN_TITLE,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Full header size (0x200).
const HEADER_SIZE: u64 = 0x200;

/// Expected logo checksum value at 0x15C.
pub const EXPECTED_LOGO_CHECKSUM: u16 = 0xCF56;

/// Unit code for DSi-exclusive software.
const UNIT_CODE_DSI: u8 = 0x03;

/// Offset of the banner title inside the icon/title block.
const BANNER_TITLE_OFFSET: u64 = 0x240;

/// Banner title length in bytes (64 UTF-16 code units).
const BANNER_TITLE_LEN: u64 = 128;

/// Nintendo compressed logo bitmap (156 bytes at offset 0xC0).
/// This is identical to the GBA Nintendo logo.
pub const NINTENDO_LOGO: [u8; 156] = [
    0x24, 0xFF, 0xAE, 0x51, 0x69, 0x9A, 0xA2, 0x21, 0x3D, 0x84, 0x82, 0x0A, 0x84, 0xE4, 0x09, 0xAD,
    0x11, 0x24, 0x8B, 0x98, 0xC0, 0x81, 0x7F, 0x21, 0xA3, 0x52, 0xBE, 0x19, 0x93, 0x09, 0xCE, 0x20,
    0x10, 0x46, 0x4A, 0x4A, 0xF8, 0x27, 0x31, 0xEC, 0x58, 0xC7, 0xE8, 0x33, 0x82, 0xE3, 0xCE, 0xBF,
    0x85, 0xF4, 0xDF, 0x94, 0xCE, 0x4B, 0x09, 0xC1, 0x94, 0x56, 0x8A, 0xC0, 0x13, 0x72, 0xA7, 0xFC,
    0x9F, 0x84, 0x4D, 0x73, 0xA3, 0xCA, 0x9A, 0x61, 0x58, 0x97, 0xA3, 0x27, 0xFC, 0x03, 0x98, 0x76,
    0x23, 0x1D, 0xC7, 0x61, 0x03, 0x04, 0xAE, 0x56, 0xBF, 0x38, 0x84, 0x00, 0x40, 0xA7, 0x0E, 0xFD,
    0xFF, 0x52, 0xFE, 0x03, 0x6F, 0x95, 0x30, 0xF1, 0x97, 0xFB, 0xC0, 0x85, 0x60, 0xD6, 0x80, 0x25,
    0xA9, 0x63, 0xBE, 0x03, 0x01, 0x4E, 0x38, 0xE2, 0xF9, 0xA2, 0x34, 0xFF, 0xBB, 0x3E, 0x03, 0x44,
    0x78, 0x00, 0x90, 0xCB, 0x88, 0x11, 0x3A, 0x94, 0x65, 0xC0, 0x7C, 0x63, 0x87, 0xF0, 0x3C, 0xAF,
    0xD6, 0x25, 0xE4, 0x8B, 0x38, 0x0A, 0xAC, 0x72, 0x21, 0xD4, 0xF8, 0x07,
];

// ---------------------------------------------------------------------------
// Header struct
// ---------------------------------------------------------------------------

/// The header fields the catalog uses. Any field may be missing when the
/// file is shorter than the header.
struct DsHeader {
    title: String,
    game_code: String,
    maker_code: String,
    rom_version: Option<u8>,
    icon_title_offset: Option<u32>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read a little-endian u32 from a byte slice, if all four bytes exist.
fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read up to `HEADER_SIZE` bytes from the start of the file.
fn read_header_bytes(reader: &mut dyn ReadSeek) -> Result<Vec<u8>, HeaderError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::with_capacity(HEADER_SIZE as usize);
    (&mut *reader).take(HEADER_SIZE).read_to_end(&mut buf)?;
    if buf.is_empty() {
        return Err(HeaderError::TooSmall {
            expected: HEADER_SIZE,
            actual: 0,
        });
    }
    Ok(buf)
}

fn parse_header(buf: &[u8]) -> DsHeader {
    DsHeader {
        // Title: 12 bytes at 0x000, Latin-1, NUL-terminated
        title: sanitize_text(&read_latin1(field(buf, 0x000, 0x00C))),
        // Game code: 4 bytes at 0x00C
        game_code: read_ascii(field(buf, 0x00C, 0x010)).trim().to_string(),
        // Maker code: 2 bytes at 0x010
        maker_code: read_ascii(field(buf, 0x010, 0x012)).trim().to_string(),
        rom_version: buf.get(0x01C).copied(),
        icon_title_offset: read_u32_le(buf, 0x068),
    }
}

/// Read the banner title, if the header points at a banner and the title
/// decodes to something non-empty.
fn read_banner_title(reader: &mut dyn ReadSeek, icon_title_offset: u32) -> Option<String> {
    if icon_title_offset == 0 {
        return None;
    }
    let start = icon_title_offset as u64 + BANNER_TITLE_OFFSET;
    if let Err(e) = reader.seek(SeekFrom::Start(start)) {
        log::debug!("Banner seek to 0x{:X} failed: {}", start, e);
        return None;
    }
    let mut buf = Vec::with_capacity(BANNER_TITLE_LEN as usize);
    if let Err(e) = (&mut *reader).take(BANNER_TITLE_LEN).read_to_end(&mut buf) {
        log::debug!("Banner read at 0x{:X} failed: {}", start, e);
        return None;
    }
    let title = sanitize_text(&read_utf16le(&buf));
    if title.is_empty() { None } else { Some(title) }
}

fn to_metadata(header: DsHeader, banner_title: Option<String>, makers: &MakerCodes) -> HeaderMetadata {
    let serial = normalize_serial(&header.game_code);
    let title = banner_title
        .or_else(|| (!header.title.is_empty()).then_some(header.title))
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    HeaderMetadata {
        title,
        region: Region::from_game_code(&serial),
        serial,
        author: sanitize_text(&makers.resolve(&header.maker_code)),
        version: HeaderMetadata::version_from_revision(header.rom_version.unwrap_or(0)),
    }
}

/// Check the logo and logo checksum shared by every DS-family header.
fn has_nintendo_logo(header: &[u8]) -> bool {
    let logo = field(header, 0xC0, 0xC0 + NINTENDO_LOGO.len());
    let checksum = field(header, 0x15C, 0x15E);
    logo == NINTENDO_LOGO
        && checksum.len() == 2
        && u16::from_le_bytes([checksum[0], checksum[1]]) == EXPECTED_LOGO_CHECKSUM
}

// ---------------------------------------------------------------------------
// Parser implementation
// ---------------------------------------------------------------------------

/// Header parser for the DS family. One instance per platform tag: DS
/// cartridges and DSi software share the layout but are catalogued apart.
#[derive(Debug, Clone, Copy)]
pub struct DsParser {
    platform: Platform,
}

impl DsParser {
    /// Parser for DS cartridges.
    pub fn nds() -> Self {
        Self {
            platform: Platform::Nds,
        }
    }

    /// Parser for DSiWare / DSi-exclusive software.
    pub fn dsi() -> Self {
        Self {
            platform: Platform::Dsi,
        }
    }
}

impl Default for DsParser {
    fn default() -> Self {
        Self::nds()
    }
}

impl HeaderParser for DsParser {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn detect(&self, header: &[u8]) -> bool {
        if !has_nintendo_logo(header) {
            return false;
        }
        let is_dsi_only = header.get(0x012) == Some(&UNIT_CODE_DSI);
        match self.platform {
            Platform::Dsi => is_dsi_only,
            _ => !is_dsi_only,
        }
    }

    fn parse(
        &self,
        reader: &mut dyn ReadSeek,
        makers: &MakerCodes,
    ) -> Result<HeaderMetadata, HeaderError> {
        let buf = read_header_bytes(reader)?;
        let header = parse_header(&buf);
        let banner_title = header
            .icon_title_offset
            .and_then(|offset| read_banner_title(reader, offset));
        Ok(to_metadata(header, banner_title, makers))
    }
}

#[cfg(test)]
#[path = "tests/ds_tests.rs"]
mod tests;

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ListingError;

/// A parsed reference listing (Logiqx-style XML).
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Listing name from the `<header>` block, if any
    pub name: String,
    pub entries: Vec<ListingEntry>,
}

/// One title entry: the `<game name="…">` attribute plus the `serial`
/// attributes of its nested `<rom>` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// Raw serial attribute values, in document order
    pub serials: Vec<String>,
}

/// Parse a listing from any buffered reader.
pub fn parse_listing<R: BufRead>(reader: R) -> Result<Listing, ListingError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut listing = Listing::default();
    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_entry: Option<ListingEntry> = None;
    let mut depth: usize = 0;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => {
                        current_entry = Some(ListingEntry {
                            name: attribute(e, b"name")?.unwrap_or_default(),
                            serials: Vec::new(),
                        });
                    }
                    "rom" => push_rom_serial(e, current_entry.as_mut())?,
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    push_rom_serial(e, current_entry.as_mut())?;
                }
            }
            Event::Text(ref e) => {
                if in_header && current_tag == "name" {
                    listing.name = e.unescape()?.to_string();
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"header" => in_header = false,
                    b"game" | b"machine" => {
                        if let Some(entry) = current_entry.take() {
                            listing.entries.push(entry);
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 || current_entry.is_some() {
        return Err(ListingError::invalid_listing("unexpected end of document"));
    }

    Ok(listing)
}

/// Parse a listing file from disk.
pub fn parse_listing_file(path: &Path) -> Result<Listing, ListingError> {
    let file = std::fs::File::open(path)?;
    parse_listing(std::io::BufReader::new(file))
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, ListingError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn push_rom_serial(
    e: &BytesStart<'_>,
    entry: Option<&mut ListingEntry>,
) -> Result<(), ListingError> {
    let Some(entry) = entry else {
        return Ok(());
    };
    if let Some(serial) = attribute(e, b"serial")? {
        if !serial.trim().is_empty() {
            entry.serials.push(serial);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;

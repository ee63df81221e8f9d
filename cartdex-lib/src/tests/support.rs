//! Shared fixtures for the unit tests: synthetic ROM images and a
//! recording art fetcher.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use cartdex_core::Platform;
use cartdex_dat::ReferenceCatalog;
use cartdex_nintendo::ds::{EXPECTED_LOGO_CHECKSUM, NINTENDO_LOGO};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::boxart::ArtFetcher;
use crate::error::BoxartError;

/// A 4 KB DS image with a valid logo and the given header fields.
pub(crate) fn nds_rom(title: &str, serial: &str, maker: &str) -> Vec<u8> {
    let mut rom = vec![0u8; 0x1000];
    let title = title.as_bytes();
    rom[..title.len().min(12)].copy_from_slice(&title[..title.len().min(12)]);
    rom[0x0C..0x10].copy_from_slice(&serial.as_bytes()[..4]);
    rom[0x10..0x12].copy_from_slice(&maker.as_bytes()[..2]);
    rom[0x1C] = 0x01;
    rom[0xC0..0xC0 + NINTENDO_LOGO.len()].copy_from_slice(&NINTENDO_LOGO);
    rom[0x15C..0x15E].copy_from_slice(&EXPECTED_LOGO_CHECKSUM.to_le_bytes());
    rom
}

/// A 1 KB GBA image with a valid logo and fixed byte.
pub(crate) fn gba_rom(title: &str, serial: &str, maker: &str) -> Vec<u8> {
    let mut rom = vec![0u8; 0x400];
    rom[0x04..0x04 + NINTENDO_LOGO.len()].copy_from_slice(&NINTENDO_LOGO);
    let title = title.as_bytes();
    rom[0xA0..0xA0 + title.len().min(12)].copy_from_slice(&title[..title.len().min(12)]);
    rom[0xAC..0xB0].copy_from_slice(&serial.as_bytes()[..4]);
    rom[0xB0..0xB2].copy_from_slice(&maker.as_bytes()[..2]);
    rom[0xB2] = 0x96;
    rom
}

pub(crate) fn write_rom(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub(crate) fn reference(entries: &[(Platform, &str, &str)]) -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::new();
    for (platform, serial, title) in entries {
        catalog.insert(*platform, serial, title);
    }
    catalog
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 40])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// Serves canned bodies by URL and records every request.
#[derive(Default)]
pub(crate) struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ArtFetcher for MockFetcher {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, BoxartError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| BoxartError::status(url, 404))
    }
}

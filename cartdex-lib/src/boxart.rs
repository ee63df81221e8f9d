//! Cover artwork resolution with an on-disk cache and a two-host fallback
//! chain (GameTDB covers, then libretro thumbnails).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cartdex_core::util::normalize_serial;
use cartdex_core::{Platform, UNKNOWN_TITLE};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat};

use crate::error::BoxartError;

pub const DEFAULT_PRIMARY_BASE: &str = "https://art.gametdb.com";
pub const DEFAULT_SECONDARY_BASE: &str = "https://thumbnails.libretro.com";
pub const DEFAULT_STANDARD_HEIGHT: u32 = 256;

/// Region tokens tried against the primary host, in order.
pub const PRIMARY_REGIONS: &[&str] = &["EN", "US", "JA", "FR", "DE", "IT", "ES"];

pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(3);
pub const SECONDARY_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters libretro replaces with `_` in thumbnail names.
const LIBRETRO_FORBIDDEN: &[char] = &['&', '*', '/', ':', '`', '<', '>', '?', '\\', '|', '"'];

/// Blocking HTTP GET used by the resolver.
pub trait ArtFetcher: Send + Sync {
    /// Fetch `url`, returning the body only for a 200 response.
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, BoxartError>;
}

/// `ArtFetcher` backed by a reqwest blocking client.
pub struct HttpArtFetcher {
    client: reqwest::blocking::Client,
}

impl HttpArtFetcher {
    pub fn new() -> Result<Self, BoxartError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cartdex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ArtFetcher for HttpArtFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, BoxartError> {
        let response = self.client.get(url).timeout(timeout).send()?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BoxartError::status(url, status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Where the resolver and its hosts live.
#[derive(Debug, Clone)]
pub struct BoxartConfig {
    /// Cache root; assets live at `{root}/{platform}/{SERIAL}.png`
    pub root: PathBuf,
    pub primary_base: String,
    pub secondary_base: String,
    /// Also store high-resolution variants under `{platform}/HQ/`
    pub hq: bool,
    /// Height of the standard asset produced from secondary-host images
    pub standard_height: u32,
}

impl BoxartConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            primary_base: DEFAULT_PRIMARY_BASE.to_string(),
            secondary_base: DEFAULT_SECONDARY_BASE.to_string(),
            hq: true,
            standard_height: DEFAULT_STANDARD_HEIGHT,
        }
    }
}

/// Which step of the chain produced an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxartSource {
    Cache,
    /// Primary host, with the region token that answered
    Primary(String),
    Secondary,
}

impl std::fmt::Display for BoxartSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Primary(region) => write!(f, "GameTDB ({region})"),
            Self::Secondary => write!(f, "libretro"),
        }
    }
}

pub struct BoxartResolver {
    config: BoxartConfig,
    fetcher: Arc<dyn ArtFetcher>,
}

impl BoxartResolver {
    pub fn new(config: BoxartConfig, fetcher: Arc<dyn ArtFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Canonical standard asset path for a key.
    pub fn cache_path(&self, platform: Platform, serial: &str) -> PathBuf {
        self.config
            .root
            .join(platform.short_name())
            .join(format!("{}.png", normalize_serial(serial)))
    }

    /// High-resolution variant path for a key.
    pub fn hq_path(&self, platform: Platform, serial: &str) -> PathBuf {
        self.config
            .root
            .join(platform.short_name())
            .join("HQ")
            .join(format!("{}_HQ.png", normalize_serial(serial)))
    }

    /// Network-free lookup of an already cached asset.
    pub fn cached(&self, platform: Platform, serial: &str) -> Option<PathBuf> {
        if normalize_serial(serial).is_empty() {
            return None;
        }
        let path = self.cache_path(platform, serial);
        path.is_file().then_some(path)
    }

    /// Cache-first resolution; on a miss walk the fallback chain.
    pub fn resolve(&self, platform: Platform, serial: &str, title: &str) -> Option<PathBuf> {
        self.resolve_with_source(platform, serial, title)
            .map(|(path, _)| path)
    }

    /// Like [`resolve`](Self::resolve), also reporting which step succeeded.
    pub fn resolve_with_source(
        &self,
        platform: Platform,
        serial: &str,
        title: &str,
    ) -> Option<(PathBuf, BoxartSource)> {
        let serial = normalize_serial(serial);
        if serial.is_empty() {
            return None;
        }
        if let Some(path) = self.cached(platform, &serial) {
            log::debug!("Boxart cache hit: {}", path.display());
            return Some((path, BoxartSource::Cache));
        }

        if let Some((path, region)) = self.fetch_primary(platform, &serial) {
            log::info!("Downloaded boxart for {serial} from GameTDB ({region})");
            return Some((path, BoxartSource::Primary(region)));
        }

        match self.fetch_secondary(platform, &serial, title) {
            Ok(Some(path)) => {
                log::info!("Downloaded boxart for {serial} from libretro");
                Some((path, BoxartSource::Secondary))
            }
            Ok(None) => None,
            Err(e) => {
                log::debug!("libretro boxart for {serial} failed: {e}");
                None
            }
        }
    }

    fn fetch_primary(&self, platform: Platform, serial: &str) -> Option<(PathBuf, String)> {
        let segment = platform.gametdb_segment()?;
        let base = self.config.primary_base.trim_end_matches('/');
        let target = self.cache_path(platform, serial);

        for region in PRIMARY_REGIONS {
            let url = format!("{base}/{segment}/cover/{region}/{serial}.jpg");
            let stored = self
                .fetcher
                .fetch(&url, PRIMARY_TIMEOUT)
                .and_then(|bytes| Ok(image::load_from_memory(&bytes)?))
                .and_then(|img| save_png(&img, &target));
            match stored {
                Ok(()) => {
                    if self.config.hq {
                        self.fetch_primary_hq(platform, segment, region, serial);
                    }
                    return Some((target, region.to_string()));
                }
                Err(e) => log::debug!("GameTDB {region} miss for {serial}: {e}"),
            }
        }
        None
    }

    fn fetch_primary_hq(&self, platform: Platform, segment: &str, region: &str, serial: &str) {
        let base = self.config.primary_base.trim_end_matches('/');
        let url = format!("{base}/{segment}/coverHQ/{region}/{serial}.jpg");
        let stored = self
            .fetcher
            .fetch(&url, PRIMARY_TIMEOUT)
            .and_then(|bytes| Ok(image::load_from_memory(&bytes)?))
            .and_then(|img| save_png(&img, &self.hq_path(platform, serial)));
        if let Err(e) = stored {
            log::debug!("No HQ cover for {serial}: {e}");
        }
    }

    fn fetch_secondary(
        &self,
        platform: Platform,
        serial: &str,
        title: &str,
    ) -> Result<Option<PathBuf>, BoxartError> {
        let title = title.trim();
        if title.is_empty() || title == UNKNOWN_TITLE {
            return Ok(None);
        }
        let url = libretro_url(&self.config.secondary_base, platform, title)?;
        let bytes = self.fetcher.fetch(&url, SECONDARY_TIMEOUT)?;
        let img = image::load_from_memory(&bytes)?;

        if self.config.hq {
            save_png(&img, &self.hq_path(platform, serial))?;
        }

        let target = self.cache_path(platform, serial);
        let height = self.config.standard_height.max(1);
        let width = ((img.width() as u64 * height as u64) / img.height().max(1) as u64).max(1) as u32;
        let standard = imageops::resize(&img.to_rgba8(), width, height, FilterType::Lanczos3);
        save_png(&DynamicImage::ImageRgba8(standard), &target)?;
        Ok(Some(target))
    }
}

/// Replace the characters libretro forbids in thumbnail names.
pub fn libretro_name(title: &str) -> String {
    title
        .chars()
        .map(|c| if LIBRETRO_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect()
}

/// `{base}/{system}/Named_Boxarts/{title}.png` with every path segment
/// percent-escaped.
pub fn libretro_url(base: &str, platform: Platform, title: &str) -> Result<String, BoxartError> {
    let mut url = reqwest::Url::parse(base).map_err(|e| BoxartError::Url(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| BoxartError::Url(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .push(platform.libretro_system())
        .push("Named_Boxarts")
        .push(&format!("{}.png", libretro_name(title)));
    Ok(url.to_string())
}

/// Encode as PNG into a temporary file, then move it into place.
fn save_png(img: &DynamicImage, path: &Path) -> Result<(), BoxartError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("png.tmp");
    if let Err(e) = img.save_with_format(&tmp, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/boxart_tests.rs"]
mod tests;

//! Parser registry and the shared read-only tables a batch runs against.

use std::io::Cursor;

use cartdex_core::{HeaderMetadata, HeaderParser, MakerCodes, Platform, ReadSeek};
use cartdex_dat::ReferenceCatalog;
use cartdex_nintendo::{DsParser, GbaParser, builtin_maker_codes};

/// One header parser per platform, selected by platform tag.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn HeaderParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::nintendo()
    }
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with the NDS, DSi and GBA parsers.
    pub fn nintendo() -> Self {
        let mut registry = Self::new();
        registry
            .register(DsParser::nds())
            .register(DsParser::dsi())
            .register(GbaParser::new());
        registry
    }

    /// Register a parser. A later parser for the same platform replaces the
    /// earlier one.
    pub fn register<P: HeaderParser + 'static>(&mut self, parser: P) -> &mut Self {
        self.parsers.retain(|p| p.platform() != parser.platform());
        self.parsers.push(Box::new(parser));
        self
    }

    pub fn get(&self, platform: Platform) -> Option<&dyn HeaderParser> {
        self.parsers
            .iter()
            .find(|p| p.platform() == platform)
            .map(|p| p.as_ref())
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.parsers.iter().map(|p| p.platform())
    }

    /// Decode a header. Never fails: any error is logged and replaced by
    /// default metadata.
    pub fn parse(
        &self,
        platform: Platform,
        reader: &mut dyn ReadSeek,
        makers: &MakerCodes,
    ) -> HeaderMetadata {
        let Some(parser) = self.get(platform) else {
            log::debug!("No header parser registered for {}", platform.short_name());
            return HeaderMetadata::default();
        };
        match parser.parse(reader, makers) {
            Ok(meta) => meta,
            Err(e) => {
                log::debug!("{} header parse failed: {}", platform.short_name(), e);
                HeaderMetadata::default()
            }
        }
    }

    /// In-memory form of [`parse`](Self::parse).
    pub fn parse_bytes(&self, platform: Platform, bytes: &[u8], makers: &MakerCodes) -> HeaderMetadata {
        self.parse(platform, &mut Cursor::new(bytes), makers)
    }

    /// Identify the platform from the first header bytes, if any parser
    /// recognizes them.
    pub fn detect(&self, header: &[u8]) -> Option<Platform> {
        self.parsers
            .iter()
            .find(|p| p.detect(header))
            .map(|p| p.platform())
    }
}

/// Immutable tables shared by every stage of a batch.
///
/// Built once at startup and passed by `Arc` into the pipeline.
pub struct CatalogContext {
    pub registry: ParserRegistry,
    pub makers: MakerCodes,
    pub reference: ReferenceCatalog,
}

impl CatalogContext {
    pub fn new(registry: ParserRegistry, makers: MakerCodes, reference: ReferenceCatalog) -> Self {
        Self {
            registry,
            makers,
            reference,
        }
    }

    /// Context with the built-in parsers and maker table.
    pub fn with_reference(reference: ReferenceCatalog) -> Self {
        Self::new(ParserRegistry::nintendo(), builtin_maker_codes(), reference)
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;

pub mod boxart;
pub mod classify;
pub mod context;
pub mod error;
pub mod export;
pub mod library;
pub mod pipeline;
pub mod rename;
pub mod scanner;
pub mod settings;

pub use boxart::{ArtFetcher, BoxartConfig, BoxartResolver, BoxartSource, HttpArtFetcher};
pub use classify::{Classification, canonical_title, classify};
pub use context::{CatalogContext, ParserRegistry};
pub use error::{BoxartError, ExportError, LibraryError, PipelineError, RenameError, SettingsError};
pub use export::{ExportOptions, export, write_catalog};
pub use pipeline::{BatchEvent, BatchHandle, BatchMode, BatchOptions, BatchPipeline, CatalogRecord, RomTask};
pub use settings::{LibraryPaths, Settings, settings_path};

// Re-export core types so frontends need only this crate.
pub use cartdex_core::{HeaderMetadata, MakerCodes, Platform, Region};
pub use cartdex_dat::ReferenceCatalog;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

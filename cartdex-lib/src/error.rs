use std::path::PathBuf;

use thiserror::Error;

/// Errors from renaming a ROM to its catalog name.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No parent directory for {0}")]
    NoParent(PathBuf),

    #[error("No free name for {name} in {dir} after {attempts} attempts")]
    Collision {
        dir: PathBuf,
        name: String,
        attempts: u32,
    },
}

/// Soft failures while fetching or storing artwork.
///
/// These never escape `BoxartResolver::resolve`; they advance the fallback
/// chain and are logged.
#[derive(Debug, Error)]
pub enum BoxartError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoxartError {
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}

/// Errors from serializing or writing the catalog.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid delimiter {0:?}: must be non-empty and contain no line breaks")]
    InvalidDelimiter(String),

    #[error("Cannot write catalog to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from starting a batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("A batch is already running against {0}")]
    Busy(PathBuf),

    #[error("Failed to spawn batch worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors from library maintenance (import/remove).
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("{0}")]
    Rename(#[from] RenameError),
}

/// Errors from loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

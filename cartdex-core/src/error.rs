use thiserror::Error;

/// Errors that can occur while decoding a cartridge header.
///
/// These never reach the catalog: the parser registry logs them and
/// substitutes default metadata.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// I/O error while reading the ROM
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is too small to contain any header field
    #[error("ROM too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: u64, actual: u64 },

    /// No parser is registered for the requested platform
    #[error("Unsupported platform: {0}")]
    Unsupported(String),
}

impl HeaderError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

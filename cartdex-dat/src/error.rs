/// Errors that can occur while reading a reference listing.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid listing: {0}")]
    InvalidListing(String),
}

impl ListingError {
    pub fn invalid_listing(msg: impl Into<String>) -> Self {
        Self::InvalidListing(msg.into())
    }
}

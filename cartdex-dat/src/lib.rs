pub mod catalog;
pub mod error;
pub mod listing;

pub use catalog::{ReferenceCatalog, listing_serials};
pub use error::ListingError;
pub use listing::{Listing, ListingEntry, parse_listing, parse_listing_file};

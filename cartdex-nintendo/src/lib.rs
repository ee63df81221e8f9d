//! Nintendo handheld header parsers.
//!
//! This crate provides header decoding for:
//!
//! - Nintendo DS
//! - Nintendo DSi (DSiWare)
//! - Game Boy Advance

pub mod ds;
pub mod gba;
pub mod licensee;

pub use ds::DsParser;
pub use gba::GbaParser;
pub use licensee::builtin_maker_codes;

//! Delimited catalog writer.
//!
//! Layout: a version line (`1`), a line holding the delimiter, then one
//! line per record with nine delimiter-joined fields.

use std::fs;
use std::path::Path;

use cartdex_core::util::sanitize_text;

use crate::error::ExportError;
use crate::pipeline::CatalogRecord;

pub const CATALOG_VERSION: &str = "1";
pub const DEFAULT_DELIMITER: &str = "\t\t";
pub const DEFAULT_BASE_URL: &str = "https://example.github.io/KekatsuDB/";
pub const HOMEBREW_AUTHOR: &str = "Homebrew";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: String,
    /// Prefix for ROM download URLs (`{rom_base}{platform}/{filename}`)
    pub rom_base_url: String,
    /// Prefix for boxart URLs (`{boxart_base}{platform}/{serial}.png`)
    pub boxart_base_url: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_base_url(DEFAULT_BASE_URL)
    }
}

impl ExportOptions {
    /// Derive ROM and boxart bases as `base + "roms/"` and `base + "boxarts/"`.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = normalize_base_url(base_url);
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            rom_base_url: format!("{base}roms/"),
            boxart_base_url: format!("{base}boxarts/"),
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

/// Trim and guarantee a trailing `/`. An empty base stays empty.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// Characters that appear in generated URLs and filenames.
const RESERVED_DELIMITER_CHARS: &[char] = &['/', ':', '.', '_', '-', '%'];

/// Reject delimiters that would break the line structure.
///
/// Fields never contain a delimiter character after cleaning, so a delimiter
/// may not use whitespace other than tab, letters, digits, or characters the
/// generated URLs and filenames rely on.
pub fn validate_delimiter(delimiter: &str) -> Result<(), ExportError> {
    let bad_char = |c: char| {
        (c.is_whitespace() && c != '\t')
            || c.is_alphanumeric()
            || RESERVED_DELIMITER_CHARS.contains(&c)
    };
    if delimiter.is_empty() || delimiter.chars().any(bad_char) {
        return Err(ExportError::InvalidDelimiter(delimiter.to_string()));
    }
    Ok(())
}

fn clean_field(value: &str, delimiter: &str) -> String {
    let value = sanitize_text(value);
    if value.contains(|c| delimiter.contains(c)) {
        let replaced: String = value
            .chars()
            .map(|c| if delimiter.contains(c) { ' ' } else { c })
            .collect();
        sanitize_text(&replaced)
    } else {
        value
    }
}

fn record_fields(record: &CatalogRecord, options: &ExportOptions) -> [String; 9] {
    let platform = record.platform.short_name();
    let rom_base = normalize_base_url(&options.rom_base_url);
    let boxart_base = normalize_base_url(&options.boxart_base_url);

    let (author, boxart_url) = if record.is_homebrew() {
        (HOMEBREW_AUTHOR.to_string(), String::new())
    } else {
        let url = match record.boxart {
            Some(_) => format!("{boxart_base}{platform}/{}.png", record.serial),
            None => String::new(),
        };
        (record.author.clone(), url)
    };

    [
        record.title.clone(),
        platform.to_string(),
        record.region.label().to_string(),
        record.version.clone(),
        author,
        format!("{rom_base}{platform}/{}", record.filename),
        record.filename.clone(),
        record.size.to_string(),
        boxart_url,
    ]
}

/// Serialize records into catalog text.
pub fn export(records: &[CatalogRecord], options: &ExportOptions) -> Result<String, ExportError> {
    let delimiter = options.delimiter.as_str();
    validate_delimiter(delimiter)?;

    let mut out = String::new();
    out.push_str(CATALOG_VERSION);
    out.push('\n');
    out.push_str(delimiter);
    out.push('\n');

    for record in records {
        let fields = record_fields(record, options).map(|f| clean_field(&f, delimiter));
        out.push_str(&fields.join(delimiter));
        out.push('\n');
    }
    Ok(out)
}

/// Write the catalog through a temporary file renamed into place.
pub fn write_catalog(
    path: &Path,
    records: &[CatalogRecord],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let text = export(records, options)?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, text).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;

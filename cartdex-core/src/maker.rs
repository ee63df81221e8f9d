//! Maker (publisher) code table.

use std::collections::HashMap;

/// Maps two-character maker codes to publisher names.
///
/// Built once at startup (built-in entries plus user overrides) and shared
/// read-only with every parser.
#[derive(Debug, Clone, Default)]
pub struct MakerCodes {
    names: HashMap<String, String>,
}

impl MakerCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(code, name)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::new();
        for (code, name) in pairs {
            table.insert(code, name);
        }
        table
    }

    /// Add or replace an entry. Codes are matched case-insensitively.
    pub fn insert(&mut self, code: impl AsRef<str>, name: impl Into<String>) {
        self.names
            .insert(code.as_ref().trim().to_uppercase(), name.into());
    }

    /// Look up a code without any fallback.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Resolve a code to an author string for the catalog.
    ///
    /// Unknown codes become `"Code <code>"`; an empty code is `"Unknown"`.
    pub fn resolve(&self, code: &str) -> String {
        let code = code.trim();
        if code.is_empty() {
            return "Unknown".to_string();
        }
        match self.get(code) {
            Some(name) => name.to_string(),
            None => format!("Code {code}"),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

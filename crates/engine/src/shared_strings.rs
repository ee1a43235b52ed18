//! Shared string resolution.
//!
//! XLSX stores most text once, in a document-wide table, and cells flagged
//! `t="s"` hold an integer index into it.

use crate::error::ExtractError;

/// Document-wide shared string table, indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    pub fn new(strings: Vec<String>) -> Self {
        Self { strings }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<String> for SharedStrings {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Resolve a cell's stored value to its literal text.
///
/// - no stored value: empty text
/// - not a shared-string reference: the stored text unchanged
/// - shared-string reference: the table entry at the parsed index
///
/// A reference with no table to resolve against degrades to the stored text.
pub fn resolve_value(
    raw: Option<&str>,
    is_shared: bool,
    strings: Option<&SharedStrings>,
) -> Result<String, ExtractError> {
    let Some(raw) = raw else {
        return Ok(String::new());
    };

    if !is_shared {
        return Ok(raw.to_string());
    }

    let Some(strings) = strings else {
        log::warn!("shared string reference '{raw}' with no shared string table; using raw value");
        return Ok(raw.to_string());
    };

    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| ExtractError::InvalidIndex(raw.to_string()))?;

    strings
        .get(index)
        .map(str::to_string)
        .ok_or(ExtractError::SharedString { index, available: strings.len() })
}

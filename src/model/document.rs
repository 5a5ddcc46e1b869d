//! The conversion result: normalized frontmatter plus a Markdown body.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::diag::Diagnostic;

/// Normalized key-value metadata extracted from a page's own properties.
///
/// Keys are lower-cased display names; the map keeps them sorted so output
/// is deterministic for a given page.
pub type Frontmatter = BTreeMap<String, FrontmatterValue>;

/// One frontmatter value. Serializes untagged, so a record becomes a flat
/// JSON object of strings, booleans, and string lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl FrontmatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        FrontmatterValue::String(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        FrontmatterValue::String(value)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(value: bool) -> Self {
        FrontmatterValue::Bool(value)
    }
}

/// A fully converted page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub frontmatter: Frontmatter,
    /// UTF-8 Markdown body.
    pub body: String,
    /// Recoverable conditions encountered while converting this page.
    pub diagnostics: Vec<Diagnostic>,
}

//! Property values and the schema describing them.

use std::collections::BTreeMap;

use super::text::{RichText, RichTextSpan};

/// Cell text marking an embedded reference rather than literal content.
pub const MENTION_SENTINEL: &str = "‣";

/// The nested payload of a mention cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionPayload {
    /// An embedded date reference (`start_date` in `YYYY-MM-DD` form).
    Date { start_date: String },
    /// A mention sub-kind this crate does not handle.
    Other(String),
}

/// One raw property cell, decoded once at the wire boundary.
///
/// The store encodes embedded references with a sentinel character in the
/// first span; that encoding is resolved here so downstream code matches on
/// the variant instead of re-inspecting cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Literal(RichText),
    Mention(MentionPayload),
}

impl PropertyValue {
    /// The literal spans, if this cell holds literal text.
    pub fn as_literal(&self) -> Option<&[RichTextSpan]> {
        match self {
            PropertyValue::Literal(spans) => Some(spans),
            PropertyValue::Mention(_) => None,
        }
    }

    /// The first span's text, if this cell holds literal text.
    pub fn first_text(&self) -> Option<&str> {
        self.as_literal()?.first().map(|span| span.text.as_str())
    }
}

/// Declared data type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Title,
    Text,
    Checkbox,
    File,
    Date,
    Relation,
    Other(String),
}

impl PropertyType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => PropertyType::Title,
            "text" => PropertyType::Text,
            "checkbox" => PropertyType::Checkbox,
            "file" => PropertyType::File,
            "date" => PropertyType::Date,
            "relation" => PropertyType::Relation,
            other => PropertyType::Other(other.to_string()),
        }
    }
}

/// Schema entry for one property: display name plus declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyType,
}

/// Property schema of a collection, keyed by opaque property key.
///
/// Iteration order (the ordered map's key order) is the column order used
/// when rendering collection tables, so it must be deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySchema {
    entries: BTreeMap<String, PropertyDef>,
}

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, def: PropertyDef) {
        self.entries.insert(key.into(), def);
    }

    pub fn get(&self, key: &str) -> Option<&PropertyDef> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDef)> {
        self.entries.iter().map(|(key, def)| (key.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

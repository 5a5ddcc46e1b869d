//! Recoverable diagnostics raised during conversion.
//!
//! Degraded input never aborts a page: unknown marks, unknown block types,
//! missing mark payloads, and unsupported block kinds are recorded here and
//! rendering continues with a substitute. Fatal conditions (collaborator
//! failures) live in [`crate::error`] instead.

use std::fmt;

/// One recoverable condition encountered while converting a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A mark tag the composer does not recognize; it contributes no styling.
    UnknownMark {
        tag: String,
        text: String,
        payload: String,
    },
    /// A link mark with no target; the text is emitted without the link.
    MissingLinkTarget { text: String },
    /// A highlight mark with no color; the highlight step is skipped.
    MissingHighlightColor { text: String },
    /// Inline equations cannot be rendered faithfully; the raw expression
    /// is passed through in place of the styled text.
    EquationUnsupported { text: String },
    /// A block kind with no Markdown counterpart (toggles); dropped.
    UnsupportedBlock { id: String, kind: String },
    /// A block type the renderer does not recognize; dropped.
    UnknownBlockType {
        id: String,
        tag: String,
        payload: String,
    },
    /// A page property key with no entry in the supplied schema; the
    /// property is omitted from frontmatter.
    UnknownPropertyKey { page_id: String, key: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownMark { tag, text, payload } => {
                write!(f, "unsupported mark '{tag}' on {text:?} with value {payload}")
            }
            Diagnostic::MissingLinkTarget { text } => {
                write!(f, "link on {text:?} has no target")
            }
            Diagnostic::MissingHighlightColor { text } => {
                write!(f, "highlight on {text:?} has no color")
            }
            Diagnostic::EquationUnsupported { text } => {
                write!(f, "in-text equation rendered as raw expression {text:?}")
            }
            Diagnostic::UnsupportedBlock { id, kind } => {
                write!(f, "{kind} block {id} is not supported")
            }
            Diagnostic::UnknownBlockType { id, tag, payload } => {
                write!(f, "unknown block type '{tag}' in block {id}: {payload}")
            }
            Diagnostic::UnknownPropertyKey { page_id, key } => {
                write!(f, "page {page_id}: property key {key} missing from schema")
            }
        }
    }
}

/// Collects the diagnostics raised while converting a single page.
///
/// Each report is also emitted as a `tracing` warning, so batch runs surface
/// degraded output without inspecting every document.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

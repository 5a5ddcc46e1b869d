//! Rich text: runs of text with inline style marks.

/// One inline style annotation applied to a run of text.
///
/// Marks whose wire payload can be absent in practice (link targets,
/// highlight colors, equation expressions) model that with an `Option` so the
/// renderer can degrade gracefully instead of failing the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    /// Hyperlink with its target URL.
    Link(Option<String>),
    /// Inline equation; the raw expression replaces the visible text.
    Equation(Option<String>),
    /// Background highlight with a color name.
    Highlight(Option<String>),
    /// A mark tag this crate does not recognize. Carried through (never
    /// silently dropped) so rendering can surface it as a diagnostic.
    Unknown { tag: String, payload: String },
}

/// A run of text plus the marks applied to it, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichTextSpan {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl RichTextSpan {
    /// A span with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// A span carrying the given marks.
    pub fn styled(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

/// A rich-text field: spans rendered in sequence with no separator.
pub type RichText = Vec<RichTextSpan>;

//! Inline rendering: rich-text spans to Markdown/HTML-hybrid text.
//!
//! Each span is rendered independently and spans concatenate in order, so a
//! field's output is exactly the concatenation of its spans' outputs.

use crate::diag::{Diagnostic, Diagnostics};
use crate::model::{Mark, RichTextSpan};

/// Render a rich-text field by concatenating its spans in order.
pub fn render_spans(spans: &[RichTextSpan], diags: &mut Diagnostics) -> String {
    let mut output = String::new();
    for span in spans {
        output.push_str(&render_span(span, diags));
    }
    output
}

/// Render one span.
///
/// Marks are scanned once into flags, then applied innermost to outermost in
/// a fixed order: code, link, bold, italic, underline, strikethrough,
/// highlight. The order is part of the output contract; see the tests.
pub fn render_span(span: &RichTextSpan, diags: &mut Diagnostics) -> String {
    if span.marks.is_empty() {
        return span.text.clone();
    }

    let mut text = span.text.clone();
    let mut bold = false;
    let mut italic = false;
    let mut underline = false;
    let mut strikethrough = false;
    let mut code = false;
    let mut link_target: Option<&str> = None;
    let mut highlight_color: Option<&str> = None;

    for mark in &span.marks {
        match mark {
            Mark::Bold => bold = true,
            Mark::Italic => italic = true,
            Mark::Underline => underline = true,
            Mark::Strikethrough => strikethrough = true,
            Mark::Code => code = true,
            Mark::Link(Some(target)) => link_target = Some(target),
            Mark::Link(None) => diags.report(Diagnostic::MissingLinkTarget {
                text: span.text.clone(),
            }),
            Mark::Equation(expression) => {
                // Known-imperfect passthrough: the raw expression replaces
                // the visible text.
                text = expression.clone().unwrap_or_default();
                diags.report(Diagnostic::EquationUnsupported {
                    text: span.text.clone(),
                });
            }
            Mark::Highlight(Some(color)) => highlight_color = Some(color),
            Mark::Highlight(None) => diags.report(Diagnostic::MissingHighlightColor {
                text: span.text.clone(),
            }),
            Mark::Unknown { tag, payload } => diags.report(Diagnostic::UnknownMark {
                tag: tag.clone(),
                text: span.text.clone(),
                payload: payload.clone(),
            }),
        }
    }

    if code {
        text = format!("`{text}`");
    }
    if let Some(target) = link_target {
        text = format!("[{text}]({target})");
    }
    if bold {
        text = format!("**{text}**");
    }
    if italic {
        text = format!("*{text}*");
    }
    if underline {
        text = format!("<u>{text}</u>");
    }
    if strikethrough {
        text = format!("~~{text}~~");
    }
    if let Some(color) = highlight_color {
        text = format!("<span color=\"{color}\">{text}</span>");
    }

    text
}

//! Pure Markdown generation from the block model.
//!
//! - [`inline`]: rich-text spans to inline Markdown (mark composition)
//! - [`render`]: the block scan producing a page body
//! - [`table`]: collection schemas + member rows as pipe tables
//!
//! ## Design notes
//!
//! - **Mark composition order**: marks accumulate into flags in one scan,
//!   then wrap the text innermost to outermost as code, link, bold, italic,
//!   underline, strikethrough, highlight. The order is fixed regardless of
//!   mark order on the wire.
//! - **List numbering**: ordinals are an explicit counter on the renderer,
//!   reset by any non-numbered block, never process-wide state.
//! - **Degraded input**: unknown marks and block types, missing mark
//!   payloads, and unsupported block kinds become diagnostics on the
//!   conversion result; only collaborator failures abort a page.

mod inline;
mod render;
mod table;

pub use inline::{render_span, render_spans};
pub use render::BodyRenderer;
pub use table::render_table;

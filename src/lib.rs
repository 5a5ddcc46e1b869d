//! # notedown
//!
//! A fast, lightweight library for converting block-based workspace pages
//! into Markdown documents with normalized frontmatter.
//!
//! ## Features
//!
//! - Render typed content blocks (headings, lists, quotes, code, callouts,
//!   to-dos, images, dividers, embedded collection tables) to Markdown
//! - Compose nested inline styling (bold, italic, links, code, highlights)
//! - Normalize page properties against a collection schema into typed
//!   frontmatter (dates, checkboxes, files, tags)
//! - Degrade gracefully: unrecognized marks and block types become
//!   diagnostics on the result, never silent drops or crashes
//!
//! ## Quick Start
//!
//! ```
//! use notedown::{PropertySchema, SnapshotWorkspace, convert_page};
//! use serde_json::json;
//!
//! let chunk = json!({
//!     "block": {
//!         "page1": { "value": { "id": "page1", "type": "page", "parent_id": "col1",
//!                               "created_time": 1_600_000_000_000i64 }},
//!         "b1": { "value": { "id": "b1", "type": "header", "parent_id": "page1",
//!                            "properties": { "title": [["Hello"]] }}},
//!     }
//! });
//!
//! let mut workspace = SnapshotWorkspace::new();
//! workspace.insert_chunk("page1", chunk);
//!
//! let document = convert_page(&mut workspace, "page1", &PropertySchema::new()).unwrap();
//! assert_eq!(document.body, "# Hello\n");
//! ```
//!
//! ## Working with a live store
//!
//! Retrieval is a collaborator, not part of the core: implement
//! [`Workspace`] over your transport and pass it to [`convert_page`]. The
//! bundled [`SnapshotWorkspace`] serves record maps captured to disk, which
//! is also how the CLI operates.

pub mod convert;
pub mod decode;
pub mod diag;
pub mod error;
pub mod frontmatter;
pub mod markdown;
pub mod model;
pub mod snapshot;
pub mod workspace;

pub use convert::{PageOutcome, convert_page, convert_pages};
pub use diag::{Diagnostic, Diagnostics};
pub use error::{Error, Result};
pub use frontmatter::{fix_frontmatter, page_frontmatter};
pub use model::{
    Block, BlockFormat, BlockType, CollectionRef, Document, Frontmatter, FrontmatterValue, Mark,
    MentionPayload, PropertyDef, PropertySchema, PropertyType, PropertyValue, RichText,
    RichTextSpan,
};
pub use snapshot::{SnapshotWorkspace, detect_page_id};
pub use workspace::{Collection, PageChunk, Workspace, local_file_name, proxied_file_url};

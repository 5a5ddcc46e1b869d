//! Page assembly: fetch, normalize, render.
//!
//! One page is converted start to finish with no state shared across
//! conversions, so independent pages can be converted by independent
//! pipeline instances.

use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::frontmatter::page_frontmatter;
use crate::markdown::BodyRenderer;
use crate::model::{BlockType, Document, Frontmatter, PropertySchema};
use crate::workspace::Workspace;

/// Convert one page into a document.
///
/// Fetches the page's blocks, normalizes the page block's own properties
/// into frontmatter, and renders the remaining blocks into the Markdown body
/// in one sequential scan. Collaborator failures abort this page only and
/// carry the page id and failing call.
pub fn convert_page<W: Workspace + ?Sized>(
    workspace: &mut W,
    page_id: &str,
    schema: &PropertySchema,
) -> Result<Document> {
    let chunk = workspace
        .fetch_page_blocks(page_id)
        .map_err(|e| Error::workspace(page_id, "fetch_page_blocks", e))?;

    let mut diags = Diagnostics::new();

    let page_block = chunk
        .blocks
        .iter()
        .find(|block| block.id == page_id && block.kind == BlockType::Page);
    let frontmatter = match page_block {
        Some(block) => {
            page_frontmatter(workspace, block, chunk.created_time, schema, &mut diags)?
        }
        None => Frontmatter::new(),
    };

    let body = BodyRenderer::new(workspace, page_id, &mut diags).render(&chunk.blocks)?;

    Ok(Document {
        frontmatter,
        body,
        diagnostics: diags.into_vec(),
    })
}

/// The result of converting one page in a batch.
#[derive(Debug)]
pub struct PageOutcome {
    pub page_id: String,
    pub result: Result<Document>,
}

/// Convert a batch of pages. A failing page is reported in its outcome and
/// never aborts the rest of the batch.
pub fn convert_pages<W: Workspace + ?Sized>(
    workspace: &mut W,
    page_ids: &[String],
    schema: &PropertySchema,
) -> Vec<PageOutcome> {
    page_ids
        .iter()
        .map(|page_id| {
            let result = convert_page(workspace, page_id, schema);
            if let Err(error) = &result {
                tracing::error!("conversion failed: {error}");
            }
            PageOutcome {
                page_id: page_id.clone(),
                result,
            }
        })
        .collect()
}

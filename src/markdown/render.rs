//! Block scan: page content blocks to a Markdown body.
//!
//! A single sequential pass over the fetched blocks, dispatching on block
//! type. The numbered-list counter is the only cross-block state and lives on
//! the renderer, scoped to one page conversion, so parallel conversions of
//! different pages cannot interfere.

use crate::diag::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use crate::model::{Block, BlockType};
use crate::workspace::Workspace;

use super::inline::render_spans;
use super::table::render_table;

/// Renders the body of one page.
pub struct BodyRenderer<'a, W: Workspace + ?Sized> {
    workspace: &'a mut W,
    page_id: &'a str,
    diags: &'a mut Diagnostics,
    output: String,
    /// Current ordinal within a run of contiguous numbered-list blocks.
    /// Any other block type seen during the scan resets it.
    numbered_item: u32,
}

impl<'a, W: Workspace + ?Sized> BodyRenderer<'a, W> {
    pub fn new(workspace: &'a mut W, page_id: &'a str, diags: &'a mut Diagnostics) -> Self {
        Self {
            workspace,
            page_id,
            diags,
            output: String::new(),
            numbered_item: 0,
        }
    }

    /// Render all blocks belonging to the page, in the order supplied.
    pub fn render(mut self, blocks: &[Block]) -> Result<String> {
        for block in blocks {
            self.render_block(block)?;
        }
        Ok(self.output)
    }

    fn render_block(&mut self, block: &Block) -> Result<()> {
        // The fetch result carries records from other pages (and the page's
        // own record, whose parent is its collection); only direct children
        // are page content.
        if block.parent_id != self.page_id {
            return Ok(());
        }

        if block.kind != BlockType::NumberedList {
            self.numbered_item = 0;
        }

        match &block.kind {
            BlockType::Text => {
                if let Some(title) = block.literal_property("title") {
                    let text = render_spans(title, self.diags);
                    self.push_line("", &text);
                }
            }
            BlockType::Header => self.heading(block, "# "),
            BlockType::SubHeader => self.heading(block, "## "),
            BlockType::SubSubHeader => self.heading(block, "### "),
            BlockType::BulletedList => {
                if let Some(title) = block.literal_property("title") {
                    let text = render_spans(title, self.diags);
                    self.push_line("- ", &text);
                }
            }
            BlockType::NumberedList => {
                if let Some(title) = block.literal_property("title") {
                    self.numbered_item += 1;
                    let text = render_spans(title, self.diags);
                    let prefix = format!("{}. ", self.numbered_item);
                    self.push_line(&prefix, &text);
                }
            }
            BlockType::Quote => {
                if let Some(title) = block.literal_property("title") {
                    let text = render_spans(title, self.diags);
                    self.push_line("> ", &text);
                }
            }
            BlockType::Code => {
                let (Some(language), Some(title)) = (
                    block.property_text("language"),
                    block.literal_property("title"),
                ) else {
                    return Ok(());
                };
                let fence_info = language.to_string();
                let body = render_spans(title, self.diags);
                self.output
                    .push_str(&format!("```{fence_info}\n{body}\n```\n"));
            }
            BlockType::Callout => {
                if let Some(title) = block.literal_property("title") {
                    let color = block.format.block_color.as_deref().unwrap_or_default();
                    let icon = block.format.page_icon.as_deref().unwrap_or_default();
                    let body = render_spans(title, self.diags);
                    self.output
                        .push_str(&format!("```callout {color}\n{icon}{body}\n```\n"));
                }
            }
            BlockType::ToDo => {
                if let Some(title) = block.literal_property("title") {
                    // Checked state defaults to false when the property is
                    // absent. Glyph mapping is pinned by a test below.
                    let checked = block.property_text("checked") == Some("Yes");
                    let prefix = if checked { "- [x] " } else { "- [ ] " };
                    let text = render_spans(title, self.diags);
                    self.push_line(prefix, &text);
                }
            }
            BlockType::Image => self.image(block)?,
            BlockType::Divider => {
                // Dividers carry no properties at all.
                self.output.push_str("---\n");
            }
            BlockType::CollectionView => self.collection_table(block)?,
            BlockType::Toggle => {
                self.diags.report(Diagnostic::UnsupportedBlock {
                    id: block.id.clone(),
                    kind: block.kind.tag().to_string(),
                });
            }
            BlockType::Page | BlockType::Unknown(_) => {
                self.diags.report(Diagnostic::UnknownBlockType {
                    id: block.id.clone(),
                    tag: block.kind.tag().to_string(),
                    payload: format!("{:?}", block.properties),
                });
            }
        }

        Ok(())
    }

    fn heading(&mut self, block: &Block, prefix: &str) {
        if let Some(title) = block.literal_property("title") {
            let text = render_spans(title, self.diags);
            self.push_line(prefix, &text);
        }
    }

    fn image(&mut self, block: &Block) -> Result<()> {
        let Some(source) = block.property_text("source") else {
            return Ok(());
        };
        // Captions win over the title for the alt text.
        let alt = match block.property_text("caption") {
            Some(caption) => caption.to_string(),
            None => block
                .literal_property("title")
                .map(|title| render_spans(title, self.diags))
                .unwrap_or_default(),
        };
        let local = self
            .workspace
            .fetch_file(&block.id, source)
            .map_err(|e| Error::workspace(self.page_id, "fetch_file", e))?;
        self.output.push_str(&format!("![{alt}]({local})\n"));
        Ok(())
    }

    fn collection_table(&mut self, block: &Block) -> Result<()> {
        let Some(collection_ref) = &block.collection else {
            tracing::debug!("collection_view {} has no collection reference", block.id);
            return Ok(());
        };
        let collection = self
            .workspace
            .query_collection(collection_ref)
            .map_err(|e| Error::workspace(self.page_id, "query_collection", e))?;
        self.output
            .push_str(&render_table(&collection.schema, &collection.pages));
        self.output.push('\n');
        Ok(())
    }

    fn push_line(&mut self, prefix: &str, text: &str) {
        self.output.push_str(prefix);
        self.output.push_str(text);
        self.output.push('\n');
    }
}

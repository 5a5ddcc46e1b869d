//! Collaborator contract between the conversion core and the document store.
//!
//! The core calls these operations; it never implements retrieval itself.
//! Each call is blocking and returns a value or a failure — retry and backoff
//! policy, if any, belongs to the implementation. A failed call aborts only
//! the page being converted.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::Result;
use crate::model::{Block, CollectionRef, PropertySchema};

/// The fetch result for one page: its blocks in scan order plus the page's
/// creation time in epoch milliseconds (when the store reported one).
#[derive(Debug, Clone, PartialEq)]
pub struct PageChunk {
    pub blocks: Vec<Block>,
    pub created_time: Option<i64>,
}

/// The query result for one collection: its property schema plus the member
/// rows that render as page entries, in the order the store returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub schema: PropertySchema,
    pub pages: Vec<Block>,
}

/// The remote document store, as seen by the conversion core.
pub trait Workspace {
    /// Fetch the block records for a page.
    fn fetch_page_blocks(&mut self, page_id: &str) -> Result<PageChunk>;

    /// Query a collection referenced from a page body.
    fn query_collection(&mut self, collection: &CollectionRef) -> Result<Collection>;

    /// Resolve a file referenced by a block to a local reference path.
    fn fetch_file(&mut self, block_id: &str, url: &str) -> Result<String>;
}

/// Everything except unreserved characters, percent-encoded.
const FILE_URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build the store's proxied download URL for a file attached to a block.
///
/// The store serves attachments through a proxy endpoint that takes the
/// original URL percent-encoded as a path segment plus the owning block id.
pub fn proxied_file_url(base: &str, block_id: &str, url: &str) -> String {
    let encoded = utf8_percent_encode(url, FILE_URL_ENCODE);
    format!("{base}/{encoded}?table=block&id={block_id}")
}

/// Derive the stable local file name for a fetched file.
///
/// # Examples
///
/// ```
/// use notedown::local_file_name;
///
/// assert_eq!(
///     local_file_name("b1", "https://host/path/pic.png?w=100"),
///     "b1-pic.png"
/// );
/// ```
pub fn local_file_name(block_id: &str, url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let base = path.rsplit('/').next().unwrap_or(path);
    format!("{block_id}-{base}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxied_url_encodes_the_original() {
        let url = proxied_file_url("https://proxy/image", "b1", "https://host/a b.png");
        assert_eq!(
            url,
            "https://proxy/image/https%3A%2F%2Fhost%2Fa%20b.png?table=block&id=b1"
        );
    }

    #[test]
    fn local_name_strips_query_and_fragment() {
        assert_eq!(local_file_name("b1", "https://h/x/y.png#frag"), "b1-y.png");
        assert_eq!(local_file_name("b2", "plain.png"), "b2-plain.png");
    }
}

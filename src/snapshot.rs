//! A [`Workspace`] over record-map JSON saved to disk.
//!
//! Useful for offline conversion and for tests: page chunks and collection
//! query results captured from the store are registered by id and served
//! back through the collaborator contract. File fetches resolve to a local
//! reference path under a static URL prefix — downloading the bytes is the
//! caller's concern, not this crate's.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::decode;
use crate::error::{Error, Result};
use crate::model::CollectionRef;
use crate::workspace::{Collection, PageChunk, Workspace, local_file_name};

/// An offline document store backed by captured record maps.
#[derive(Debug)]
pub struct SnapshotWorkspace {
    pages: HashMap<String, Value>,
    collections: HashMap<String, Value>,
    static_url: String,
}

impl SnapshotWorkspace {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            collections: HashMap::new(),
            static_url: "/static".to_string(),
        }
    }

    /// Set the URL prefix under which fetched files are recorded.
    pub fn with_static_url(mut self, static_url: impl Into<String>) -> Self {
        self.static_url = static_url.into();
        self
    }

    /// Register a page's record map.
    pub fn insert_page(&mut self, page_id: impl Into<String>, record_map: Value) {
        self.pages.insert(page_id.into(), record_map);
    }

    /// Register a collection-query record map.
    pub fn insert_collection(&mut self, collection_id: impl Into<String>, record_map: Value) {
        self.collections.insert(collection_id.into(), record_map);
    }

    /// Register a page chunk along with every collection record riding in it,
    /// so embedded collection views resolve without a separate capture.
    pub fn insert_chunk(&mut self, page_id: impl Into<String>, record_map: Value) {
        if let Some(table) = record_map.get("collection").and_then(Value::as_object) {
            for collection_id in table.keys() {
                self.collections
                    .insert(collection_id.clone(), record_map.clone());
            }
        }
        self.insert_page(page_id, record_map);
    }

    /// Load a chunk file from disk and register it. Returns the page id,
    /// detected from the chunk when not supplied.
    pub fn add_chunk_file(&mut self, path: &Path, page_id: Option<&str>) -> Result<String> {
        let raw = std::fs::read(path)?;
        let record_map: Value = serde_json::from_slice(&raw)?;
        let page_id = match page_id {
            Some(id) => id.to_string(),
            None => detect_page_id(&record_map).ok_or_else(|| {
                Error::InvalidRecordMap(format!("no page record in {}", path.display()))
            })?,
        };
        self.insert_chunk(page_id.clone(), record_map);
        Ok(page_id)
    }
}

impl Workspace for SnapshotWorkspace {
    fn fetch_page_blocks(&mut self, page_id: &str) -> Result<PageChunk> {
        let record_map = self
            .pages
            .get(page_id)
            .ok_or_else(|| Error::UnknownPage(page_id.to_string()))?;
        decode::page_chunk(page_id, record_map)
    }

    fn query_collection(&mut self, collection: &CollectionRef) -> Result<Collection> {
        let record_map = self
            .collections
            .get(&collection.collection_id)
            .ok_or_else(|| Error::UnknownCollection(collection.collection_id.clone()))?;
        decode::collection(&collection.collection_id, record_map)
    }

    fn fetch_file(&mut self, block_id: &str, url: &str) -> Result<String> {
        Ok(format!(
            "{}/{}",
            self.static_url,
            local_file_name(block_id, url)
        ))
    }
}

/// Find the page a chunk was fetched for: the first `page`-typed block in
/// the record map.
pub fn detect_page_id(record_map: &Value) -> Option<String> {
    let table = record_map.get("block")?.as_object()?;
    for entry in table.values() {
        let Some(value) = entry.get("value") else {
            continue;
        };
        if value.get("type").and_then(Value::as_str) == Some("page") {
            return value.get("id").and_then(Value::as_str).map(str::to_string);
        }
    }
    None
}

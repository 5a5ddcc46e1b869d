//! Wire-format decoding: the store's JSON record maps into model values.
//!
//! A record map groups records by table (`block`, `collection`, …), each
//! entry wrapping its fields in a `value` object. Object order is meaningful:
//! blocks arrive in scan order and schemas in column order, so this module
//! relies on order-preserving JSON parsing.
//!
//! The mention sentinel is resolved here, once, into
//! [`PropertyValue::Mention`] — downstream code never re-inspects cell text.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    Block, BlockFormat, BlockType, CollectionRef, MENTION_SENTINEL, Mark, MentionPayload,
    PropertyDef, PropertySchema, PropertyType, PropertyValue, RichText, RichTextSpan,
};
use crate::workspace::{Collection, PageChunk};

/// Decode a page-fetch record map into the page's chunk.
///
/// Blocks keep the record map's order. The creation time is read from the
/// page's own block when present.
pub fn page_chunk(page_id: &str, record_map: &Value) -> Result<PageChunk> {
    let table = record_map
        .get("block")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::InvalidRecordMap("missing block table".to_string()))?;

    let mut blocks = Vec::with_capacity(table.len());
    let mut created_time = None;

    for (id, entry) in table {
        let Some(value) = entry.get("value") else {
            tracing::debug!("block {id} has no value; skipped");
            continue;
        };
        let Some(decoded) = block(value) else {
            tracing::debug!("block {id} is malformed; skipped");
            continue;
        };
        if decoded.id == page_id && decoded.kind == BlockType::Page {
            created_time = value.get("created_time").and_then(Value::as_i64);
        }
        blocks.push(decoded);
    }

    Ok(PageChunk {
        blocks,
        created_time,
    })
}

/// Decode a collection-query record map into the collection's schema and its
/// renderable member rows (in arrival order).
pub fn collection(collection_id: &str, record_map: &Value) -> Result<Collection> {
    let schema_value = record_map
        .get("collection")
        .and_then(|table| table.get(collection_id))
        .and_then(|entry| entry.get("value"))
        .and_then(|value| value.get("schema"))
        .ok_or_else(|| {
            Error::InvalidRecordMap(format!("no schema for collection {collection_id}"))
        })?;
    let schema = property_schema(schema_value);

    let mut pages = Vec::new();
    if let Some(table) = record_map.get("block").and_then(Value::as_object) {
        for entry in table.values() {
            let Some(decoded) = entry.get("value").and_then(block) else {
                continue;
            };
            if decoded.parent_id == collection_id && decoded.kind == BlockType::Page {
                pages.push(decoded);
            }
        }
    }

    Ok(Collection { schema, pages })
}

/// Decode a property schema object (`key → {name, type}`).
pub fn property_schema(value: &Value) -> PropertySchema {
    let mut schema = PropertySchema::new();
    if let Some(map) = value.as_object() {
        for (key, def) in map {
            let name = def.get("name").and_then(Value::as_str).unwrap_or_default();
            let kind = def.get("type").and_then(Value::as_str).unwrap_or_default();
            schema.insert(
                key.clone(),
                PropertyDef {
                    name: name.to_string(),
                    kind: PropertyType::from_tag(kind),
                },
            );
        }
    }
    schema
}

/// The schema of the first collection in a record map, if any.
///
/// A page fetched from a collection carries its collection record alongside
/// the blocks, which is where batch callers pick the schema up.
pub fn collection_schema(record_map: &Value) -> Option<PropertySchema> {
    let table = record_map.get("collection")?.as_object()?;
    let entry = table.values().next()?;
    Some(property_schema(entry.get("value")?.get("schema")?))
}

/// Decode one block record. Returns `None` when the record lacks an id or
/// type tag.
pub fn block(value: &Value) -> Option<Block> {
    let id = value.get("id")?.as_str()?.to_string();
    let kind = BlockType::from_tag(value.get("type")?.as_str()?);
    let parent_id = value
        .get("parent_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let properties = value
        .get("properties")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(key, cell)| (key.clone(), property_value(cell)))
                .collect::<BTreeMap<_, _>>()
        });

    let format = BlockFormat {
        block_color: format_field(value, "block_color"),
        page_icon: format_field(value, "page_icon"),
    };

    let collection = if kind == BlockType::CollectionView {
        collection_ref(value, &id)
    } else {
        None
    };

    Some(Block {
        id,
        kind,
        parent_id,
        properties,
        format,
        collection,
    })
}

fn format_field(value: &Value, field: &str) -> Option<String> {
    value
        .get("format")?
        .get(field)?
        .as_str()
        .map(str::to_string)
}

fn collection_ref(value: &Value, view_id: &str) -> Option<CollectionRef> {
    Some(CollectionRef {
        space_id: value.get("space_id")?.as_str()?.to_string(),
        collection_id: value.get("collection_id")?.as_str()?.to_string(),
        view_id: view_id.to_string(),
    })
}

/// Decode one property cell, resolving the mention sentinel.
pub fn property_value(cell: &Value) -> PropertyValue {
    if let Some(payload) = mention_payload(cell) {
        return PropertyValue::Mention(payload);
    }
    PropertyValue::Literal(rich_text(cell))
}

fn mention_payload(cell: &Value) -> Option<MentionPayload> {
    let first = cell.get(0)?;
    if first.get(0)?.as_str()? != MENTION_SENTINEL {
        return None;
    }
    let entry = first.get(1)?.get(0)?;
    let tag = entry.get(0)?.as_str()?;
    if tag == "d"
        && let Some(start) = entry
            .get(1)
            .and_then(|payload| payload.get("start_date"))
            .and_then(Value::as_str)
    {
        return Some(MentionPayload::Date {
            start_date: start.to_string(),
        });
    }
    Some(MentionPayload::Other(tag.to_string()))
}

/// Decode a rich-text cell (`[[text, [mark…]?], …]`).
pub fn rich_text(cell: &Value) -> RichText {
    let Some(spans) = cell.as_array() else {
        return Vec::new();
    };
    spans.iter().filter_map(span).collect()
}

fn span(value: &Value) -> Option<RichTextSpan> {
    let parts = value.as_array()?;
    let text = parts.first()?.as_str()?.to_string();
    let marks = match parts.get(1).and_then(Value::as_array) {
        Some(raw) => raw.iter().map(mark).collect(),
        None => Vec::new(),
    };
    Some(RichTextSpan { text, marks })
}

fn mark(value: &Value) -> Mark {
    let tag = value.get(0).and_then(Value::as_str).unwrap_or_default();
    let payload = value.get(1);
    let payload_str = || payload.and_then(Value::as_str).map(str::to_string);

    match tag {
        "b" => Mark::Bold,
        "i" => Mark::Italic,
        // Two wire spellings for underline.
        "u" | "_" => Mark::Underline,
        "s" => Mark::Strikethrough,
        "c" => Mark::Code,
        "a" => Mark::Link(payload_str()),
        "e" => Mark::Equation(payload_str()),
        "h" => Mark::Highlight(payload_str()),
        _ => Mark::Unknown {
            tag: tag.to_string(),
            payload: payload.map(Value::to_string).unwrap_or_default(),
        },
    }
}

//! Property normalization: a page's raw properties into frontmatter.
//!
//! Each property resolves its display name through the collection schema and
//! its value through the schema-declared type, with special handling for
//! mention-encoded dates, checkboxes, and file references. Keys are then
//! lower-cased and a comma-joined `tags` value is split into a list.

use chrono::{DateTime, NaiveDate, Utc};

use crate::diag::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use crate::model::{
    Block, Frontmatter, FrontmatterValue, Mark, MentionPayload, PropertySchema, PropertyType,
    PropertyValue, RichTextSpan,
};
use crate::workspace::Workspace;

/// Normalize the page block's properties into a frontmatter record.
///
/// `created_time` is the page creation timestamp in epoch milliseconds,
/// supplied out-of-band by the retrieval collaborator; it becomes the `date`
/// key. A property key missing from the schema is omitted with a diagnostic;
/// only a failing file fetch aborts the page.
pub fn page_frontmatter<W: Workspace + ?Sized>(
    workspace: &mut W,
    page: &Block,
    created_time: Option<i64>,
    schema: &PropertySchema,
    diags: &mut Diagnostics,
) -> Result<Frontmatter> {
    let mut record = Frontmatter::new();

    if let Some(millis) = created_time
        && let Some(stamp) = isoformat_millis(millis)
    {
        record.insert("date".to_string(), FrontmatterValue::String(stamp));
    }

    if let Some(properties) = &page.properties {
        for (key, value) in properties {
            let Some(def) = schema.get(key) else {
                diags.report(Diagnostic::UnknownPropertyKey {
                    page_id: page.id.clone(),
                    key: key.clone(),
                });
                continue;
            };

            match value {
                PropertyValue::Mention(MentionPayload::Date { start_date }) => {
                    match isoformat_date(start_date) {
                        Some(stamp) => {
                            record.insert(def.name.clone(), FrontmatterValue::String(stamp));
                        }
                        None => tracing::debug!(
                            "page {}: unparseable date {start_date:?} in property {key}",
                            page.id
                        ),
                    }
                }
                PropertyValue::Mention(MentionPayload::Other(tag)) => {
                    tracing::debug!(
                        "page {}: unhandled mention kind '{tag}' in property {key}",
                        page.id
                    );
                }
                PropertyValue::Literal(spans) => match def.kind {
                    PropertyType::Checkbox => {
                        let checked = spans.first().is_some_and(|span| span.text == "Yes");
                        record.insert(def.name.clone(), FrontmatterValue::Bool(checked));
                    }
                    PropertyType::File => {
                        let Some(url) = file_url(spans) else {
                            tracing::debug!(
                                "page {}: file property {key} has no URL",
                                page.id
                            );
                            continue;
                        };
                        let local = workspace
                            .fetch_file(&page.id, url)
                            .map_err(|e| Error::workspace(&page.id, "fetch_file", e))?;
                        record.insert(def.name.clone(), FrontmatterValue::String(local));
                    }
                    _ => {
                        let text = spans
                            .first()
                            .map(|span| span.text.clone())
                            .unwrap_or_default();
                        record.insert(def.name.clone(), FrontmatterValue::String(text));
                    }
                },
            }
        }
    }

    Ok(fix_frontmatter(record))
}

/// Post-process a frontmatter record: lower-case every key and split a
/// comma-joined `tags` string into trimmed entries. Idempotent.
pub fn fix_frontmatter(record: Frontmatter) -> Frontmatter {
    let mut result = Frontmatter::new();
    for (key, value) in record {
        result.insert(key.to_lowercase(), value);
    }

    if let Some(FrontmatterValue::String(joined)) = result.get("tags") {
        let tags = joined
            .split(',')
            .map(|tag| tag.trim().to_string())
            .collect();
        result.insert("tags".to_string(), FrontmatterValue::List(tags));
    }

    result
}

/// Epoch milliseconds to an ISO-8601 timestamp in UTC.
pub(crate) fn isoformat_millis(millis: i64) -> Option<String> {
    let stamp = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(stamp.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// A `YYYY-MM-DD` date to an ISO-8601 timestamp at midnight.
fn isoformat_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(format!("{date}T00:00:00"))
}

/// A file cell stores its URL as the link target of the first span.
fn file_url(spans: &[RichTextSpan]) -> Option<&str> {
    spans.first()?.marks.iter().find_map(|mark| match mark {
        Mark::Link(Some(target)) => Some(target.as_str()),
        _ => None,
    })
}

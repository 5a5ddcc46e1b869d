//! End-to-end conversion tests over snapshot-backed workspaces.
//!
//! These drive the whole pipeline the way the CLI does: record-map JSON in,
//! frontmatter + Markdown body out.

use notedown::{
    Diagnostic, Error, FrontmatterValue, PropertySchema, SnapshotWorkspace, convert_page,
    convert_pages, decode,
};
use serde_json::{Value, json};

fn page_chunk() -> Value {
    json!({
        "block": {
            "page1": { "value": {
                "id": "page1", "type": "page", "parent_id": "col1",
                "created_time": 1_600_000_000_000i64,
                "properties": {
                    "tt": [["My Page"]],
                    "tg": [["rust, markdown"]],
                    "pb": [["Yes"]],
                    "dl": [["‣", [["d", { "start_date": "2021-03-04", "type": "date" }]]]],
                }
            }},
            "b1": { "value": { "id": "b1", "type": "header", "parent_id": "page1",
                               "properties": { "title": [["Overview"]] }}},
            "b2": { "value": { "id": "b2", "type": "text", "parent_id": "page1",
                               "properties": { "title": [
                                   ["see "],
                                   ["docs", [["a", "http://d"], ["b"]]]
                               ]}}},
            "b3": { "value": { "id": "b3", "type": "numbered_list", "parent_id": "page1",
                               "properties": { "title": [["one"]] }}},
            "b4": { "value": { "id": "b4", "type": "numbered_list", "parent_id": "page1",
                               "properties": { "title": [["two"]] }}},
            "b5": { "value": { "id": "b5", "type": "divider", "parent_id": "page1" }},
            "b6": { "value": { "id": "b6", "type": "numbered_list", "parent_id": "page1",
                               "properties": { "title": [["after"]] }}},
            "b7": { "value": { "id": "b7", "type": "toggle", "parent_id": "page1",
                               "properties": { "title": [["hidden"]] }}},
            "b8": { "value": { "id": "b8", "type": "collection_view", "parent_id": "page1",
                               "space_id": "s1", "collection_id": "col2" }},
            "x1": { "value": { "id": "x1", "type": "header", "parent_id": "page2",
                               "properties": { "title": [["foreign"]] }}},
        },
        "collection": {
            "col1": { "value": { "schema": {
                "tt": { "name": "Title", "type": "title" },
                "tg": { "name": "Tags", "type": "text" },
                "pb": { "name": "Published", "type": "checkbox" },
                "dl": { "name": "Deadline", "type": "date" },
            }}}
        }
    })
}

fn embedded_collection() -> Value {
    json!({
        "collection": {
            "col2": { "value": { "schema": {
                "aa": { "name": "Name", "type": "title" },
                "bb": { "name": "Status", "type": "text" },
            }}}
        },
        "block": {
            "r1": { "value": { "id": "r1", "type": "page", "parent_id": "col2",
                               "properties": { "aa": [["zebra"]], "bb": [["done"]] }}},
            "r2": { "value": { "id": "r2", "type": "page", "parent_id": "col2",
                               "properties": { "aa": [["apple"]], "bb": [["open"]] }}},
        }
    })
}

fn workspace() -> (SnapshotWorkspace, PropertySchema) {
    let chunk = page_chunk();
    let schema = decode::collection_schema(&chunk).expect("chunk carries its schema");
    let mut workspace = SnapshotWorkspace::new();
    workspace.insert_chunk("page1", chunk);
    workspace.insert_collection("col2", embedded_collection());
    (workspace, schema)
}

// ============================================================================
// Full page conversion
// ============================================================================

#[test]
fn converts_a_page_end_to_end() {
    let (mut workspace, schema) = workspace();
    let document = convert_page(&mut workspace, "page1", &schema).unwrap();

    assert_eq!(
        document.body,
        "# Overview\n\
         see **[docs](http://d)**\n\
         1. one\n\
         2. two\n\
         ---\n\
         1. after\n\
         | Name | Status |\n\
         | --- | --- |\n\
         | zebra | done |\n\
         | apple | open |\n\
         \n"
    );

    // The toggle is the only degraded input in the fixture.
    assert_eq!(
        document.diagnostics,
        vec![Diagnostic::UnsupportedBlock {
            id: "b7".to_string(),
            kind: "toggle".to_string()
        }]
    );
}

#[test]
fn frontmatter_is_normalized_and_typed() {
    let (mut workspace, schema) = workspace();
    let document = convert_page(&mut workspace, "page1", &schema).unwrap();
    let frontmatter = &document.frontmatter;

    assert_eq!(
        frontmatter.get("date").and_then(FrontmatterValue::as_str),
        Some("2020-09-13T12:26:40")
    );
    assert_eq!(
        frontmatter.get("title").and_then(FrontmatterValue::as_str),
        Some("My Page")
    );
    assert_eq!(
        frontmatter.get("published"),
        Some(&FrontmatterValue::Bool(true))
    );
    assert_eq!(
        frontmatter
            .get("deadline")
            .and_then(FrontmatterValue::as_str),
        Some("2021-03-04T00:00:00")
    );
    assert_eq!(
        frontmatter.get("tags"),
        Some(&FrontmatterValue::List(vec![
            "rust".to_string(),
            "markdown".to_string()
        ]))
    );
}

#[test]
fn frontmatter_serializes_to_a_flat_object() {
    let (mut workspace, schema) = workspace();
    let document = convert_page(&mut workspace, "page1", &schema).unwrap();
    let line = serde_json::to_string(&document.frontmatter).unwrap();
    let round: Value = serde_json::from_str(&line).unwrap();

    assert_eq!(round["published"], json!(true));
    assert_eq!(round["tags"], json!(["rust", "markdown"]));
    assert_eq!(round["title"], json!("My Page"));
}

// ============================================================================
// Degraded input
// ============================================================================

#[test]
fn schema_misses_degrade_to_a_diagnostic() {
    let (mut workspace, _) = workspace();
    // An empty schema turns every page property into a miss.
    let document = convert_page(&mut workspace, "page1", &PropertySchema::new()).unwrap();

    // Conversion still completes with the body intact...
    assert!(document.body.starts_with("# Overview\n"));
    // ...the properties are omitted (only the creation date remains)...
    assert_eq!(document.frontmatter.len(), 1);
    assert!(document.frontmatter.contains_key("date"));
    // ...and each miss is reported once, plus the toggle.
    let misses = document
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::UnknownPropertyKey { .. }))
        .count();
    assert_eq!(misses, 4);
}

#[test]
fn missing_embedded_collection_fails_the_page_with_context() {
    let chunk = page_chunk();
    let schema = decode::collection_schema(&chunk).unwrap();
    let mut workspace = SnapshotWorkspace::new();
    workspace.insert_chunk("page1", chunk);
    // col2 deliberately not registered.

    let error = convert_page(&mut workspace, "page1", &schema).unwrap_err();
    match error {
        Error::Workspace { page_id, call, .. } => {
            assert_eq!(page_id, "page1");
            assert_eq!(call, "query_collection");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Batch conversion
// ============================================================================

#[test]
fn one_failing_page_does_not_abort_the_batch() {
    let (mut workspace, schema) = workspace();
    let ids = vec![
        "missing".to_string(),
        "page1".to_string(),
    ];
    let outcomes = convert_pages(&mut workspace, &ids, &schema);

    assert_eq!(outcomes.len(), 2);
    let failed = outcomes[0].result.as_ref().unwrap_err();
    assert!(matches!(
        failed,
        Error::Workspace { page_id, call, .. }
            if page_id == "missing" && *call == "fetch_page_blocks"
    ));
    assert!(outcomes[1].result.is_ok());
}

// ============================================================================
// Snapshot loading from disk
// ============================================================================

#[test]
fn chunk_files_load_and_convert() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page1.json");
    std::fs::write(&path, serde_json::to_vec(&page_chunk()).unwrap()).unwrap();

    let mut workspace = SnapshotWorkspace::new().with_static_url("/assets");
    let page_id = workspace.add_chunk_file(&path, None).unwrap();
    assert_eq!(page_id, "page1");

    workspace.insert_collection("col2", embedded_collection());
    let chunk: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let schema = decode::collection_schema(&chunk).unwrap();

    let document = convert_page(&mut workspace, &page_id, &schema).unwrap();
    assert!(document.body.contains("| zebra | done |"));
}

//! Collection tables as Markdown pipe tables.

use crate::model::{Block, PropertySchema};

/// Render a collection's member rows as a pipe table.
///
/// Header cells are the schema's display names and body cells are each row's
/// first literal value for that property, both in schema iteration order.
/// Rows come out exactly in the order supplied; no sorting is applied (row
/// order is whatever the collection query returned).
pub fn render_table(schema: &PropertySchema, rows: &[Block]) -> String {
    let mut output = String::new();

    let header: Vec<&str> = schema.iter().map(|(_, def)| def.name.as_str()).collect();
    push_row(&mut output, &header);

    let separator: Vec<&str> = schema.iter().map(|_| "---").collect();
    push_row(&mut output, &separator);

    for row in rows {
        let cells: Vec<&str> = schema
            .iter()
            .map(|(key, _)| row.property_text(key).unwrap_or(""))
            .collect();
        push_row(&mut output, &cells);
    }

    output
}

fn push_row(output: &mut String, cells: &[&str]) {
    output.push_str("| ");
    output.push_str(&cells.join(" | "));
    output.push_str(" |\n");
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::{
        Block, BlockType, PropertyDef, PropertyType, PropertyValue, RichTextSpan,
    };

    fn schema_of(entries: &[(&str, &str)]) -> PropertySchema {
        let mut schema = PropertySchema::new();
        for (key, name) in entries {
            schema.insert(
                *key,
                PropertyDef {
                    name: name.to_string(),
                    kind: PropertyType::Text,
                },
            );
        }
        schema
    }

    fn row(id: &str, cells: &[(&str, &str)]) -> Block {
        let mut properties = BTreeMap::new();
        for (key, text) in cells {
            properties.insert(
                key.to_string(),
                PropertyValue::Literal(vec![RichTextSpan::plain(*text)]),
            );
        }
        Block::new(id, BlockType::Page, "col1").with_properties(properties)
    }

    #[test]
    fn header_and_separator_follow_schema() {
        let schema = schema_of(&[("aa", "Name"), ("bb", "Status")]);
        let table = render_table(&schema, &[]);
        assert_eq!(table, "| Name | Status |\n| --- | --- |\n");
    }

    #[test]
    fn body_cells_use_first_literal_value() {
        let schema = schema_of(&[("aa", "Name"), ("bb", "Status")]);
        let rows = vec![
            row("r1", &[("aa", "Widget"), ("bb", "done")]),
            row("r2", &[("aa", "Gadget"), ("bb", "open")]),
        ];
        let table = render_table(&schema, &rows);
        assert_eq!(
            table,
            "| Name | Status |\n\
             | --- | --- |\n\
             | Widget | done |\n\
             | Gadget | open |\n"
        );
    }

    #[test]
    fn missing_cells_render_empty() {
        let schema = schema_of(&[("aa", "Name"), ("bb", "Status")]);
        let rows = vec![row("r1", &[("bb", "open")])];
        let table = render_table(&schema, &rows);
        assert!(table.ends_with("|  | open |\n"));
    }

    #[test]
    fn row_order_is_preserved_as_supplied() {
        let schema = schema_of(&[("aa", "Name")]);
        // Deliberately not alphabetical; the output must not reorder.
        let rows = vec![
            row("r1", &[("aa", "zebra")]),
            row("r2", &[("aa", "apple")]),
            row("r3", &[("aa", "mango")]),
        ];
        let table = render_table(&schema, &rows);
        let body: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(body, vec!["| zebra |", "| apple |", "| mango |"]);
    }
}

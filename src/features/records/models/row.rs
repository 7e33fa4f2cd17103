use serde_json::Value;

use crate::features::records::schema::{ColumnKind, RecordSchema};
use crate::modules::store::Document;

/// A stored document coerced into the fixed shape of its record table.
///
/// `cells` parallels the schema's column list. A cell is never absent: fields
/// missing from the document, and photo slots past the end of the stored
/// list, normalize to the empty string here, at the loader boundary. Photo
/// cells hold the raw URL; the "no photo" placeholder belongs to rendering
/// and export, not to the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    /// Store-assigned document id; immutable, used as the row key.
    pub id: String,
    pub cells: Vec<String>,
}

impl RecordRow {
    /// Normalize one document into the schema's row shape.
    pub fn from_document(schema: &RecordSchema, doc: &Document) -> Self {
        let cells = schema
            .columns
            .iter()
            .map(|col| {
                let value = doc.fields.get(col.field);
                match col.kind {
                    ColumnKind::Text => text_value(value),
                    ColumnKind::Photo => photo_value(value, col.photo_index),
                }
            })
            .collect();

        Self {
            id: doc.id.clone(),
            cells,
        }
    }

    /// Cell of the first column backed by `field`, or "" if the schema has no
    /// such column.
    pub fn cell<'a>(&'a self, schema: &RecordSchema, field: &str) -> &'a str {
        schema
            .column_index(field)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn text_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn photo_value(value: Option<&Value>, index: usize) -> String {
    match value {
        Some(Value::Array(items)) => items
            .get(index)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        Some(Value::String(s)) if index == 0 => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::schema::{CORRALON, VALES};
    use crate::shared::test_helpers::doc;
    use serde_json::json;

    #[test]
    fn maps_document_fields_in_column_order() {
        let document = doc(
            "abc123",
            json!({
                "fecha": "2024-05-03",
                "seguro": "Qualitas",
                "municipio": "Atizapán",
                "marca": "Nissan",
                "placas": "ABC-12-34",
                "fotos": ["https://img.example.com/1.jpg", "https://img.example.com/2.jpg"]
            }),
        );

        let row = RecordRow::from_document(&VALES, &document);

        assert_eq!(row.id, "abc123");
        assert_eq!(
            row.cells,
            vec![
                "2024-05-03",
                "Qualitas",
                "Atizapán",
                "Nissan",
                "ABC-12-34",
                "https://img.example.com/1.jpg",
                "https://img.example.com/2.jpg",
            ]
        );
    }

    #[test]
    fn missing_fields_default_to_empty_string() {
        let document = doc("x1", json!({ "fecha": "2024-01-01" }));

        let row = RecordRow::from_document(&VALES, &document);

        assert_eq!(row.cells[0], "2024-01-01");
        for cell in &row.cells[1..] {
            assert_eq!(cell, "");
        }
    }

    #[test]
    fn sparse_photo_list_fills_remaining_slots_with_empty() {
        let document = doc(
            "x2",
            json!({ "fotos": ["https://img.example.com/solo.jpg"] }),
        );

        let row = RecordRow::from_document(&VALES, &document);

        assert_eq!(row.cell(&VALES, "fotos"), "https://img.example.com/solo.jpg");
        assert_eq!(row.cells[6], "");
    }

    #[test]
    fn scalar_photo_field_satisfies_index_zero_only() {
        let document = doc("x3", json!({ "foto": "https://img.example.com/g.jpg" }));

        let row = RecordRow::from_document(&CORRALON, &document);

        assert_eq!(row.cells[5], "https://img.example.com/g.jpg");
    }

    #[test]
    fn non_string_values_normalize_to_empty() {
        let document = doc(
            "x4",
            json!({ "fecha": 20240503, "municipio": null, "marca": true }),
        );

        let row = RecordRow::from_document(&VALES, &document);

        assert_eq!(row.cell(&VALES, "fecha"), "");
        assert_eq!(row.cell(&VALES, "municipio"), "");
        assert_eq!(row.cell(&VALES, "marca"), "");
    }

    #[test]
    fn cell_lookup_for_unknown_field_is_empty() {
        let document = doc("x5", json!({ "fecha": "2024-01-01" }));
        let row = RecordRow::from_document(&VALES, &document);

        assert_eq!(row.cell(&VALES, "taller"), "");
    }
}

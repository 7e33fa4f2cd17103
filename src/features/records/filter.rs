use serde::Deserialize;

use crate::features::records::models::RecordRow;
use crate::features::records::schema::RecordSchema;

/// Filter inputs as they arrive from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordQuery {
    /// Free-text term, matched against the schema's search fields.
    #[serde(default)]
    pub q: String,
    /// Literal date prefix, matched against the schema's date field.
    #[serde(default)]
    pub fecha: String,
}

/// Applies the text and date filters to a working set.
///
/// A row passes when the case-folded term is a substring of at least one
/// search field (or the term is empty), AND its date cell starts with the
/// literal date string (or the date is empty). The date comparison is a
/// plain string prefix, not a parsed date: "2024-05" matches "2024-05-03".
/// Pure and order-preserving; the working set is never mutated.
pub fn filter_rows<'a>(
    schema: &RecordSchema,
    rows: &'a [RecordRow],
    query: &RecordQuery,
) -> Vec<&'a RecordRow> {
    let term = query.q.to_lowercase();

    rows.iter()
        .filter(|row| {
            let text_match = term.is_empty()
                || schema
                    .search_fields
                    .iter()
                    .any(|field| row.cell(schema, field).to_lowercase().contains(&term));

            let date_match = query.fecha.is_empty()
                || row.cell(schema, schema.date_field).starts_with(&query.fecha);

            text_match && date_match
        })
        .collect()
}

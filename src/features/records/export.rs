//! Spreadsheet export of the currently filtered rows.

use rust_xlsxwriter::Workbook;

use crate::core::error::{AppError, Result};
use crate::features::records::models::RecordRow;
use crate::features::records::schema::{ColumnKind, RecordSchema};
use crate::shared::constants::NO_PHOTO;

/// Header row plus one row per filtered record, cell for cell what the table
/// displays: photo cells carry the raw URL, or the placeholder literal when
/// empty. The export never embeds image data.
pub fn export_grid(schema: &RecordSchema, rows: &[&RecordRow]) -> Vec<Vec<String>> {
    let mut grid = Vec::with_capacity(rows.len() + 1);

    grid.push(
        schema
            .columns
            .iter()
            .map(|c| c.header.to_string())
            .collect(),
    );

    for row in rows {
        grid.push(
            schema
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(col, cell)| match col.kind {
                    ColumnKind::Photo if cell.is_empty() => NO_PHOTO.to_string(),
                    _ => cell.clone(),
                })
                .collect(),
        );
    }

    grid
}

/// Builds the single-sheet workbook for the filtered rows.
pub fn write_workbook(schema: &RecordSchema, rows: &[&RecordRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(schema.sheet_name)
        .map_err(|e| AppError::Internal(format!("Failed to name worksheet: {}", e)))?;

    for (r, cells) in export_grid(schema, rows).iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            worksheet
                .write_string(r as u32, c as u16, cell)
                .map_err(|e| AppError::Internal(format!("Failed to write cell: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::Internal(format!("Failed to build workbook: {}", e)))
}

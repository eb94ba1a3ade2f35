use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use super::RowSource;
use crate::error::{GradeError, Result};
use crate::model::RawRow;

/// A workbook cell, reduced to what the row normalizer cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Blank, boolean, date, error and any other cell kind.
    Other,
}

impl Cell {
    /// Cell text as seen by the row normalizer.
    ///
    /// Numbers use their shortest decimal form, so `12345.0` becomes `"12345"`.
    /// Anything that is neither text nor a number becomes the empty string.
    pub fn into_text(self) -> String {
        match self {
            Cell::Text(s) => s,
            Cell::Number(n) => n.to_string(),
            Cell::Other => String::new(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
            Cell::Other => true,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            _ => Cell::Other,
        }
    }
}

/// Reads the first sheet of a workbook; its first row holds the headers.
///
/// The whole sheet is loaded into memory. A workbook without sheets, or whose
/// first row is blank, yields no rows. Fully blank data rows are skipped.
pub struct SpreadsheetReader;

impl RowSource for SpreadsheetReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>> {
        let bytes = std::fs::read(path).map_err(|source| GradeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Detect the workbook kind from its content, not its extension.
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| workbook_error(path, e))?;

        let Some(range) = workbook.worksheet_range_at(0) else {
            return Ok(Vec::new());
        };
        let range = range.map_err(|e| workbook_error(path, e))?;

        Ok(range_to_rows(&range))
    }
}

/// Turns a sheet's used range into row-maps keyed by the sheet's first row.
///
/// A range only covers used cells, so it starts at the first non-empty cell.
/// If that is below row 1 the header row is missing and nothing is returned.
/// Header and data cells share the range's start column, so positions line up.
fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
    match range.start() {
        Some((0, _)) => {}
        Some((start_row, _)) => {
            debug!(start_row, "First sheet row is blank, no header row");
            return Vec::new();
        }
        None => return Vec::new(),
    }

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| Cell::from(c).into_text().trim().to_string())
        .collect();

    sheet_rows
        .filter_map(|cells| cells_to_row(&headers, cells))
        .collect()
}

/// Pairs each header with the cell at the same position.
///
/// Returns `None` for a row with no content at all.
fn cells_to_row(headers: &[String], cells: &[Data]) -> Option<RawRow> {
    let cells: Vec<Cell> = (0..headers.len())
        .map(|idx| cells.get(idx).map(Cell::from).unwrap_or(Cell::Other))
        .collect();

    if cells.iter().all(Cell::is_blank) {
        return None;
    }

    Some(
        headers
            .iter()
            .cloned()
            .zip(cells.into_iter().map(Cell::into_text))
            .collect(),
    )
}

fn workbook_error(path: &Path, err: calamine::Error) -> GradeError {
    match err {
        calamine::Error::Io(source) => GradeError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => GradeError::Spreadsheet {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

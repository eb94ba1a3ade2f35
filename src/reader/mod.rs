//! Mark sheet readers.
//!
//! [`SheetFormat`] picks a reader from the file extension. Every reader yields
//! the same thing: one [`RawRow`] per data row, keyed by the header row.

mod delimited;
mod spreadsheet;

pub use delimited::DelimitedReader;
pub use spreadsheet::{Cell, SpreadsheetReader};

use std::path::Path;
use tracing::debug;

use crate::error::{GradeError, Result};
use crate::model::RawRow;

/// Something that can turn a file on disk into header-keyed rows.
pub trait RowSource {
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>>;
}

/// Input formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Comma-separated text (`.csv`).
    Delimited,
    /// Workbook (`.xlsx`, `.xls` and the other formats the workbook reader opens).
    Spreadsheet,
}

impl SheetFormat {
    /// Resolves the format from a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(SheetFormat::Delimited),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Ok(SheetFormat::Spreadsheet),
            _ => Err(GradeError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }
}

/// Reads all data rows of `path` with the given reader.
pub fn read_with<R: RowSource>(reader: &R, path: &Path) -> Result<Vec<RawRow>> {
    let rows = reader.read_rows(path)?;
    debug!(path = %path.display(), rows = rows.len(), "Read raw rows");
    Ok(rows)
}

/// Reads all data rows of `path`, choosing the reader from its extension.
///
/// # Errors
///
/// Returns [`GradeError::UnsupportedFormat`] for unknown extensions, and an
/// I/O, CSV or spreadsheet error when the file itself cannot be read.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Delimited => read_with(&DelimitedReader, path),
        SheetFormat::Spreadsheet => read_with(&SpreadsheetReader, path),
    }
}

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

use super::RowSource;
use crate::error::{GradeError, Result};
use crate::model::RawRow;

/// Reads comma-separated mark sheets whose first line holds the headers.
///
/// Data fields are zipped positionally against the headers. Rows may be
/// ragged: surplus fields are ignored and missing ones are simply absent.
/// Bytes that are not valid UTF-8 are replaced with U+FFFD in that field only.
pub struct DelimitedReader;

impl RowSource for DelimitedReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>> {
        let file = File::open(path).map_err(|source| GradeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(file);

        let csv_err = |source: csv::Error| GradeError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let headers: Vec<String> = rdr
            .byte_headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let mut rows = Vec::new();

        for result in rdr.byte_records() {
            let record = result.map_err(csv_err)?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), String::from_utf8_lossy(v).into_owned()))
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}

//! Error types for reading and writing mark sheets.
//!
//! Only file-level and format-level failures are errors. Rows that cannot be
//! turned into a [`Student`](crate::model::Student) are dropped by the parser
//! and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the caller of the grading pipeline.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The file extension does not map to a known mark sheet format.
    #[error("unsupported file type: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The file could not be opened, read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited-text reader or writer failed.
    #[error("failed to process CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or its first sheet could not be read.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, GradeError>;

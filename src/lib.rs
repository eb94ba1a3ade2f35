pub mod error;
pub mod grade;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod stats;

pub use error::{GradeError, Result};
pub use model::{Grade, RawRow, Student};
pub use pipeline::{
    GradingReport, grade_all, parse_mark_sheet, process_mark_sheet, summarize, write_results,
};
pub use stats::ClassSummary;

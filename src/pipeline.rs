//! End-to-end grading runs.
//!
//! These are the entry points a shell (CLI, menu, GUI) calls: parse a mark
//! sheet, grade it, write the graded file and summarize the class.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::model::Student;
use crate::stats::ClassSummary;
use crate::{grade, output, parser, reader};

/// Reads a mark sheet and normalizes its rows into students.
///
/// Rows without a name or ID are skipped. File-level problems are returned
/// as errors.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn parse_mark_sheet(path: &Path) -> Result<Vec<Student>> {
    let rows = reader::read_rows(path)?;
    let total_rows = rows.len();
    let students = parser::parse_rows(rows);
    info!(
        rows = total_rows,
        students = students.len(),
        "Mark sheet parsed"
    );
    Ok(students)
}

/// Grades every student in place.
pub fn grade_all(students: &mut [Student]) {
    grade::grade_all(students);
}

/// Writes graded students to `path` in the fixed output layout.
pub fn write_results(students: &[Student], path: &Path) -> Result<()> {
    output::write_results(students, path)
}

pub fn summarize(students: &[Student]) -> ClassSummary {
    ClassSummary::from_students(students)
}

/// Outcome of one full grading run.
#[derive(Debug, Serialize)]
pub struct GradingReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub output: PathBuf,
    pub summary: ClassSummary,
    pub students: Vec<Student>,
}

/// Parses, grades, writes and summarizes one mark sheet.
///
/// The graded file goes to `destination` when given, otherwise to
/// `graded_<stem>.csv` next to the input. A sheet with no usable rows is not
/// an error; the report then has an empty student list.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn process_mark_sheet(input: &Path, destination: Option<&Path>) -> Result<GradingReport> {
    let mut students = parse_mark_sheet(input)?;
    grade_all(&mut students);

    let output_path = destination
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output::graded_output_path(input));
    write_results(&students, &output_path)?;

    let summary = summarize(&students);
    info!(
        students = summary.count,
        average = summary.average,
        output = %output_path.display(),
        "Grading run complete"
    );

    Ok(GradingReport {
        generated_at: Utc::now(),
        source: input.to_path_buf(),
        output: output_path,
        summary,
        students,
    })
}

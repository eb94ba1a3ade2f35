//! Output formatting and persistence for graded mark sheets.
//!
//! Supports writing the graded CSV, a plain-text class summary and JSON.

use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{GradeError, Result};
use crate::grade::GRADING_SCALE;
use crate::model::Student;
use crate::stats::ClassSummary;

/// Column order of the graded output file.
pub const OUTPUT_HEADERS: [&str; 6] = [
    "Student Name",
    "Matric Number",
    "CA",
    "Exam",
    "Total",
    "Grade",
];

/// Prefix added to the input file name to build the default output name.
pub const OUTPUT_PREFIX: &str = "graded_";

#[derive(Serialize)]
struct GradedRow<'a> {
    name: &'a str,
    student_id: &'a str,
    ca_score: f64,
    exam_score: f64,
    total_score: f64,
    grade: &'a str,
}

impl<'a> From<&'a Student> for GradedRow<'a> {
    fn from(s: &'a Student) -> Self {
        GradedRow {
            name: &s.name,
            student_id: &s.student_id,
            ca_score: s.ca_score,
            exam_score: s.exam_score,
            total_score: s.total_score,
            grade: s.grade_label(),
        }
    }
}

/// Writes students to `path` as CSV, replacing any existing file.
///
/// The header row is always written, followed by one row per student in
/// input order.
pub fn write_results(students: &[Student], path: &Path) -> Result<()> {
    debug!(path = %path.display(), students = students.len(), "Writing graded CSV");

    let file = File::create(path).map_err(|source| GradeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source: csv::Error| GradeError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Headers are written by hand so that an empty batch still gets them.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(OUTPUT_HEADERS).map_err(csv_err)?;
    for student in students {
        writer.serialize(GradedRow::from(student)).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| GradeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = students.len(), "Graded results written");
    Ok(())
}

/// `graded_<stem>.csv` next to the input file.
pub fn graded_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{OUTPUT_PREFIX}{stem}.csv"))
}

/// One-line outcome of a grading run.
///
/// A run with no valid rows still writes a header-only file, and says so.
pub fn render_outcome(input: &Path, output: &Path, graded: usize) -> String {
    if graded == 0 {
        format!(
            "No valid student records found in {}. Wrote an empty graded file to {}",
            input.display(),
            output.display()
        )
    } else {
        format!("Graded {graded} students. Results saved to {}", output.display())
    }
}

/// Renders class statistics and a grade distribution bar chart.
pub fn render_summary(summary: &ClassSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Class Statistics");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Students:      {}", summary.count);
    let _ = writeln!(out, "Average Score: {:.2}", summary.average);
    let _ = writeln!(out, "Highest Score: {:.2}", summary.highest);
    let _ = writeln!(out, "Lowest Score:  {:.2}", summary.lowest);
    let _ = writeln!(out);
    let _ = writeln!(out, "Grade Distribution:");

    if summary.distribution.is_empty() {
        let _ = writeln!(out, "  No graded students.");
    }
    for (grade, count) in &summary.distribution {
        let label = if grade.is_empty() { "-" } else { grade.as_str() };
        let _ = writeln!(out, "  {label}: {} ({count} students)", "#".repeat(*count));
    }

    out
}

/// Renders the first `limit` students, one per line.
pub fn render_preview(students: &[Student], limit: usize) -> String {
    let mut out = String::new();

    for s in students.iter().take(limit) {
        let _ = writeln!(
            out,
            "Name: {} | ID: {} | Score: {:.2} | Grade: {}",
            s.name,
            s.student_id,
            s.total_score,
            s.grade_label()
        );
    }
    if students.len() > limit {
        let _ = writeln!(out, "... and {} more students", students.len() - limit);
    }

    out
}

/// Renders the grading scale with its remarks.
pub fn render_scale() -> String {
    let mut out = String::new();
    for band in GRADING_SCALE {
        let upper = if band.upper_inclusive {
            format!("{}]", band.upper)
        } else {
            format!("{})", band.upper)
        };
        let _ = writeln!(
            out,
            "{}: [{}, {:<5} {}",
            band.grade, band.lower, upper, band.remark
        );
    }
    out
}

/// Serializes any report as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::grade_all;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample() -> Vec<Student> {
        let mut students = vec![
            Student::new("Alice", "12345").with_scores(30.0, 45.0),
            Student::new("Bob", "23456").with_scores(25.0, 32.5),
        ];
        grade_all(&mut students);
        students
    }

    #[test]
    fn test_write_results_layout() {
        let path = temp_path("mark_grader_test_layout.csv");
        let _ = fs::remove_file(&path);

        write_results(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Student Name,Matric Number,CA,Exam,Total,Grade");
        assert_eq!(lines[1], "Alice,12345,30.0,45.0,75.0,A");
        assert_eq!(lines[2], "Bob,23456,25.0,32.5,57.5,C");
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_empty_batch_has_header() {
        let path = temp_path("mark_grader_test_empty.csv");
        let _ = fs::remove_file(&path);

        write_results(&[], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_overwrites() {
        let path = temp_path("mark_grader_test_overwrite.csv");
        fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        write_results(&sample()[..1], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("stale"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_quotes_commas() {
        let path = temp_path("mark_grader_test_quotes.csv");
        let mut students = vec![Student::new("Doe, Jane", "9").with_scores(20.0, 20.0)];
        grade_all(&mut students);

        write_results(&students, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Doe, Jane\",9,20.0,20.0,40.0,E"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_bad_directory_is_io_error() {
        let path = temp_path("mark_grader_no_such_dir").join("out.csv");
        let err = write_results(&sample(), &path).unwrap_err();
        assert!(matches!(err, GradeError::Io { .. }));
    }

    #[test]
    fn test_graded_output_path() {
        assert_eq!(
            graded_output_path(Path::new("/data/marks/class.xlsx")),
            PathBuf::from("/data/marks/graded_class.csv")
        );
        assert_eq!(
            graded_output_path(Path::new("sample_input.csv")),
            PathBuf::from("graded_sample_input.csv")
        );
    }

    #[test]
    fn test_render_outcome_names_output_file() {
        let text = render_outcome(Path::new("in.csv"), Path::new("graded_in.csv"), 3);
        assert_eq!(text, "Graded 3 students. Results saved to graded_in.csv");
    }

    #[test]
    fn test_render_outcome_empty_run_mentions_written_file() {
        let text = render_outcome(Path::new("in.csv"), Path::new("graded_in.csv"), 0);
        assert!(text.starts_with("No valid student records found in in.csv."));
        assert!(text.ends_with("Wrote an empty graded file to graded_in.csv"));
    }

    #[test]
    fn test_render_summary() {
        let summary = ClassSummary::from_students(&sample());
        let text = render_summary(&summary);
        assert!(text.contains("Average Score: 66.25"));
        assert!(text.contains("A: # (1 students)"));
        assert!(text.contains("C: # (1 students)"));
    }

    #[test]
    fn test_render_preview_truncates() {
        let text = render_preview(&sample(), 1);
        assert!(text.contains("Name: Alice | ID: 12345 | Score: 75.00 | Grade: A"));
        assert!(text.contains("... and 1 more students"));
        assert!(!text.contains("Bob"));
    }

    #[test]
    fn test_render_scale_lists_all_bands() {
        let text = render_scale();
        assert_eq!(text.lines().count(), GRADING_SCALE.len());
        assert!(text.starts_with("A: [70, 100]"));
        assert!(text.contains("Fail"));
    }

    #[test]
    fn test_to_json_does_not_panic() {
        let summary = ClassSummary::from_students(&sample());
        let json = to_json(&summary).unwrap();
        assert!(json.contains("\"distribution\""));
    }
}

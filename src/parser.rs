//! Row normalizer: turns a header-to-cell row-map into a [`Student`].
//!
//! Mark sheets in the wild spell their headers differently, so each field is
//! looked up through an ordered list of accepted labels. The first label that
//! is present with a usable value wins. Labels are matched exactly
//! (case-sensitive).

use tracing::debug;

use crate::model::{RawRow, Student};

/// Accepted labels for the student's name, in lookup order.
pub const NAME_HEADERS: &[&str] = &["Student Name", "Name"];
/// Accepted labels for the student's ID / matric number, in lookup order.
pub const ID_HEADERS: &[&str] = &["Matric Number", "ID", "studentId"];
pub const CA_HEADERS: &[&str] = &["CA", "CA Score"];
pub const EXAM_HEADERS: &[&str] = &["Exam", "Exam Score"];
pub const TOTAL_HEADERS: &[&str] = &["Total"];

/// Builds a [`Student`] from one row-map.
///
/// Returns `None` when the row has no name or no ID. Numeric fields degrade
/// independently: a missing or unparsable score falls through to the next
/// label and finally to `0.0` without affecting the rest of the row.
pub fn parse_row(row: &RawRow) -> Option<Student> {
    let Some(name) = lookup_text(row, NAME_HEADERS) else {
        debug!(?row, "Dropping row without a student name");
        return None;
    };
    let Some(student_id) = lookup_text(row, ID_HEADERS) else {
        debug!(name, "Dropping row without a student ID");
        return None;
    };

    let ca = lookup_number(row, CA_HEADERS).unwrap_or(0.0);
    let exam = lookup_number(row, EXAM_HEADERS).unwrap_or(0.0);
    let total = lookup_number(row, TOTAL_HEADERS).unwrap_or(0.0);

    Some(
        Student::new(name, student_id)
            .with_scores(ca, exam)
            .with_total(total),
    )
}

/// Parses every row, silently skipping the ones [`parse_row`] rejects.
pub fn parse_rows<I>(rows: I) -> Vec<Student>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut students = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        match parse_row(&row) {
            Some(student) => students.push(student),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(kept = students.len(), dropped, "Rows normalized");
    }
    students
}

/// Parses a score cell. Blank, non-numeric and non-finite text yields `None`.
pub fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lookup_text<'a>(row: &'a RawRow, labels: &[&str]) -> Option<&'a str> {
    labels
        .iter()
        .filter_map(|label| row.get(*label))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

fn lookup_number(row: &RawRow, labels: &[&str]) -> Option<f64> {
    labels
        .iter()
        .filter_map(|label| row.get(*label))
        .find_map(|value| parse_score(value))
}

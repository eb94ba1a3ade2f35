//! Student records and the raw row-maps they are built from.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Header label to cell text, exactly as read from one row of a mark sheet.
pub type RawRow = HashMap<String, String>;

/// Letter grade assigned by [`crate::grade`].
///
/// Variant order matches the alphabetical order of the labels, so sorting by
/// `Grade` and sorting by label agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
    Invalid,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One student's scores from a mark sheet.
///
/// `total_score` of `0.0` means "not computed yet"; a positive total read from
/// the sheet is kept as-is by the grade engine. `grade` stays `None` until
/// [`crate::grade::assign_grade`] runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub name: String,
    pub student_id: String,
    pub ca_score: f64,
    pub exam_score: f64,
    pub total_score: f64,
    pub grade: Option<Grade>,
}

impl Student {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Student {
            name: name.into(),
            student_id: student_id.into(),
            ca_score: 0.0,
            exam_score: 0.0,
            total_score: 0.0,
            grade: None,
        }
    }

    /// Sets the CA and exam components.
    pub fn with_scores(mut self, ca_score: f64, exam_score: f64) -> Self {
        self.ca_score = ca_score;
        self.exam_score = exam_score;
        self
    }

    /// Sets an explicit total, as found in a sheet's `Total` column.
    pub fn with_total(mut self, total_score: f64) -> Self {
        self.total_score = total_score;
        self
    }

    /// Fills in `total_score` from the components unless a positive total is already set.
    pub fn compute_total(&mut self) {
        if self.total_score <= 0.0 {
            self.total_score = self.ca_score + self.exam_score;
        }
    }

    /// Grade label for reports; empty while ungraded.
    pub fn grade_label(&self) -> &'static str {
        self.grade.map(Grade::label).unwrap_or("")
    }
}

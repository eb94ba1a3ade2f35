//! Grade engine: totals and letter grades.

use tracing::warn;

use crate::model::{Grade, Student};

/// One contiguous score range of the grading scale.
#[derive(Debug, Clone, Copy)]
pub struct GradeBand {
    /// Inclusive lower bound.
    pub lower: f64,
    pub upper: f64,
    /// Whether `upper` itself belongs to the band.
    pub upper_inclusive: bool,
    pub grade: Grade,
    pub remark: &'static str,
}

impl GradeBand {
    /// Band covering `[lower, upper]`.
    pub const fn closed(lower: f64, upper: f64, grade: Grade, remark: &'static str) -> Self {
        GradeBand {
            lower,
            upper,
            upper_inclusive: true,
            grade,
            remark,
        }
    }

    /// Band covering `[lower, upper)`.
    pub const fn half_open(lower: f64, upper: f64, grade: Grade, remark: &'static str) -> Self {
        GradeBand {
            lower,
            upper,
            upper_inclusive: false,
            grade,
            remark,
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower
            && if self.upper_inclusive {
                score <= self.upper
            } else {
                score < self.upper
            }
    }
}

/// Highest valid total.
pub const MAX_SCORE: f64 = 100.0;

/// The grading scale, checked top to bottom.
///
/// | Range     | Grade |
/// |-----------|-------|
/// | [70, 100] | A     |
/// | [60, 70)  | B     |
/// | [50, 60)  | C     |
/// | [45, 50)  | D     |
/// | [40, 45)  | E     |
/// | [0, 40)   | F     |
pub static GRADING_SCALE: &[GradeBand] = &[
    GradeBand::closed(70.0, MAX_SCORE, Grade::A, "Excellent"),
    GradeBand::half_open(60.0, 70.0, Grade::B, "Good"),
    GradeBand::half_open(50.0, 60.0, Grade::C, "Satisfactory"),
    GradeBand::half_open(45.0, 50.0, Grade::D, "Acceptable"),
    GradeBand::half_open(40.0, 45.0, Grade::E, "Pass"),
    GradeBand::half_open(0.0, 40.0, Grade::F, "Fail"),
];

/// Maps a total score to its letter grade.
///
/// Totals outside `[0, 100]` (and NaN) are [`Grade::Invalid`].
pub fn grade_for(total: f64) -> Grade {
    if !(0.0..=MAX_SCORE).contains(&total) {
        return Grade::Invalid;
    }
    GRADING_SCALE
        .iter()
        .find(|band| band.contains(total))
        .map(|band| band.grade)
        .unwrap_or(Grade::Invalid)
}

/// Computes the student's total if needed, then sets their grade.
pub fn assign_grade(student: &mut Student) {
    student.compute_total();
    let grade = grade_for(student.total_score);
    if grade == Grade::Invalid {
        warn!(
            student_id = %student.student_id,
            total = student.total_score,
            "Total outside 0-100, grading as Invalid"
        );
    }
    student.grade = Some(grade);
}

/// Grades every student in place.
pub fn grade_all(students: &mut [Student]) {
    for student in students.iter_mut() {
        assign_grade(student);
    }
}

//! Class-level statistics over a batch of graded students.
//!
//! Every statistic has a defined value for an empty batch. Note that
//! [`highest`] and [`lowest`] return `0.0` for an empty batch, which is
//! indistinguishable from a real score of zero; check
//! [`ClassSummary::count`] when that matters.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::Student;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassSummary {
    pub count: usize,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Students per grade label, sorted by label.
    pub distribution: BTreeMap<String, usize>,
}

impl ClassSummary {
    pub fn from_students(students: &[Student]) -> Self {
        ClassSummary {
            count: students.len(),
            average: average(students),
            highest: highest(students),
            lowest: lowest(students),
            distribution: grade_distribution(students),
        }
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean total score; 0.0 for an empty batch.
pub fn average(students: &[Student]) -> f64 {
    let totals: Vec<f64> = students.iter().map(|s| s.total_score).collect();
    mean(&totals)
}

/// Highest total score; 0.0 for an empty batch.
pub fn highest(students: &[Student]) -> f64 {
    students
        .iter()
        .map(|s| s.total_score)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Lowest total score; 0.0 for an empty batch.
pub fn lowest(students: &[Student]) -> f64 {
    students
        .iter()
        .map(|s| s.total_score)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Counts students per grade label.
///
/// Labels are compared exactly, so `Invalid` gets its own bucket and ungraded
/// students are counted under the empty label.
pub fn grade_distribution(students: &[Student]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for student in students {
        *counts.entry(student.grade_label().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::grade_all;

    fn graded(scores: &[(f64, f64)]) -> Vec<Student> {
        let mut students: Vec<Student> = scores
            .iter()
            .enumerate()
            .map(|(i, (ca, exam))| {
                Student::new(format!("S{i}"), i.to_string()).with_scores(*ca, *exam)
            })
            .collect();
        grade_all(&mut students);
        students
    }

    #[test]
    fn test_empty_batch_defaults() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(highest(&[]), 0.0);
        assert_eq!(lowest(&[]), 0.0);
        assert!(grade_distribution(&[]).is_empty());
        assert_eq!(ClassSummary::from_students(&[]), ClassSummary::default());
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_average_highest_lowest() {
        let students = graded(&[(30.0, 45.0), (25.0, 30.0), (40.0, 35.0)]);
        assert!((average(&students) - 68.333).abs() < 0.001);
        assert_eq!(highest(&students), 75.0);
        assert_eq!(lowest(&students), 55.0);
    }

    #[test]
    fn test_distribution_sorted_by_label() {
        let students = graded(&[
            (60.0, 50.0),
            (30.0, 45.0),
            (10.0, 5.0),
            (25.0, 30.0),
            (35.0, 40.0),
        ]);
        let dist = grade_distribution(&students);

        let labels: Vec<_> = dist.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["A", "C", "F", "Invalid"]);
        assert_eq!(dist["A"], 2);
        assert_eq!(dist["Invalid"], 1);
    }

    #[test]
    fn test_ungraded_students_use_empty_label() {
        let students = vec![Student::new("Alice", "1")];
        let dist = grade_distribution(&students);
        assert_eq!(dist[""], 1);
    }

    #[test]
    fn test_summary_from_students() {
        let students = graded(&[(30.0, 45.0), (25.0, 30.0)]);
        let summary = ClassSummary::from_students(&students);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, 65.0);
        assert_eq!(summary.highest, 75.0);
        assert_eq!(summary.lowest, 55.0);
        assert_eq!(summary.distribution.len(), 2);
    }
}

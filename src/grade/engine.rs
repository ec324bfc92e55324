#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::ops::RangeInclusive;

use super::{
    error::{GradeError, ValidationError},
    results::SubjectScore,
};

/// Valid marks for a single subject.
pub const MARKS_RANGE: RangeInclusive<i64> = 0..=100;

/// Total and percentage for a list of subjects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Sum of all marks.
    pub total:      u64,
    /// `total` divided by the number of subjects, unrounded.
    pub percentage: f64,
}

/// Checks one subject: a non-blank name and marks inside [`MARKS_RANGE`].
pub fn validate_subject(subject: &SubjectScore) -> Result<(), ValidationError> {
    if subject.name.trim().is_empty() {
        return Err(ValidationError::EmptySubjectName);
    }
    if !MARKS_RANGE.contains(&subject.marks) {
        return Err(ValidationError::MarksOutOfRange {
            subject: subject.name.clone(),
            marks:   subject.marks,
        });
    }
    Ok(())
}

/// Computes the total and percentage of `subjects`.
///
/// Out-of-range marks are rejected rather than clamped. An empty slice is an
/// error since there is nothing to average.
pub fn compute_summary(subjects: &[SubjectScore]) -> Result<Summary, GradeError> {
    if subjects.is_empty() {
        return Err(GradeError::EmptyInput);
    }

    let mut total: u64 = 0;
    for subject in subjects {
        validate_subject(subject)?;
        total = total
            .checked_add(subject.marks.unsigned_abs())
            .ok_or(GradeError::TotalOverflow)?;
    }

    Ok(Summary {
        total,
        percentage: total as f64 / subjects.len() as f64,
    })
}

/// Parses marks typed into a form field.
pub fn parse_marks(subject: &str, raw: &str) -> Result<i64, ValidationError> {
    let marks = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            subject: subject.to_string(),
            raw:     raw.to_string(),
        })?;

    if !MARKS_RANGE.contains(&marks) {
        return Err(ValidationError::MarksOutOfRange {
            subject: subject.to_string(),
            marks,
        });
    }
    Ok(marks)
}

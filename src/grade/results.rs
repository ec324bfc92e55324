#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::builder;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use super::{
    engine::{Summary, compute_summary},
    error::GradeError,
    policy::GradingPolicy,
};

#[derive(Tabled, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Marks obtained in one subject.
pub struct SubjectScore {
    #[tabled(rename = "Subject")]
    /// * `name`: name of the subject, eg. `Math`
    pub name:  String,
    #[tabled(rename = "Marks")]
    /// * `marks`: marks on the 0-100 scale; checked when a summary is computed
    pub marks: i64,
}

impl SubjectScore {
    /// Creates a new subject score -
    /// * `name` - subject name
    /// * `marks` - marks obtained, not yet validated
    pub fn new(name: impl Into<String>, marks: i64) -> Self {
        Self {
            name: name.into(),
            marks,
        }
    }
}

/// Letter grade assigned by a [`GradingPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// Top band of both policies.
    #[serde(rename = "A+")]
    APlus,
    /// Second band.
    A,
    /// Third band.
    B,
    /// Fourth band.
    C,
    /// Lowest passing band of the six-level policy.
    D,
    /// Failing grade of the six-level policy.
    F,
    /// Failing grade of the four-level policy.
    Fail,
}

impl LetterGrade {
    /// Returns the grade as it is printed and stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
            LetterGrade::Fail => "Fail",
        }
    }
}

impl Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative standing that accompanies a six-level grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// 90 and above.
    Excellent,
    /// 80 to below 90.
    #[serde(rename = "Very Good")]
    VeryGood,
    /// 70 to below 80.
    Good,
    /// 60 to below 70.
    Average,
    /// 40 to below 60.
    Pass,
    /// Below 40.
    Fail,
}

impl Status {
    /// Returns the status as it is printed and stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Excellent => "Excellent",
            Status::VeryGood => "Very Good",
            Status::Good => "Good",
            Status::Average => "Average",
            Status::Pass => "Pass",
            Status::Fail => "Fail",
        }
    }

    /// Whether the student passed.
    pub fn is_pass(&self) -> bool {
        !matches!(self, Status::Fail)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade and status derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    /// The letter grade.
    pub grade:  LetterGrade,
    /// The qualitative status; `None` for policies without one.
    pub status: Option<Status>,
}

impl Display for GradeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.grade, status),
            None => write!(f, "{}", self.grade),
        }
    }
}

/// A student's marks together with the derived total and percentage.
///
/// Only constructed through [`StudentRecord::new`] (or [`student_record`]),
/// so `total` and `percentage` always agree with `subjects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    /// Student name.
    name:       String,
    /// Roll number.
    roll:       String,
    /// Per-subject marks in entry order.
    subjects:   Vec<SubjectScore>,
    /// Sum of all marks.
    total:      u64,
    /// Average mark.
    percentage: f64,
}

impl StudentRecord {
    /// Validates `subjects` and computes the summary fields.
    pub fn new(
        name: impl Into<String>,
        roll: impl Into<String>,
        subjects: Vec<SubjectScore>,
    ) -> Result<Self, GradeError> {
        let Summary { total, percentage } = compute_summary(&subjects)?;
        Ok(Self {
            name: name.into(),
            roll: roll.into(),
            subjects,
            total,
            percentage,
        })
    }

    /// Student name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roll number.
    pub fn roll(&self) -> &str {
        &self.roll
    }

    /// Per-subject marks.
    pub fn subjects(&self) -> &[SubjectScore] {
        &self.subjects
    }

    /// Sum of all marks.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Average mark, unrounded.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Grades this record under `policy`.
    pub fn classify(&self, policy: GradingPolicy) -> GradeResult {
        policy.classify(self.percentage)
    }
}

/// Builder-friendly constructor for `StudentRecord`.
#[builder(finish_fn = build)]
pub fn student_record(
    #[builder(into)] name: String,
    #[builder(into)] roll: String,
    #[builder(with = FromIterator::from_iter)] subjects: Vec<SubjectScore>,
) -> Result<StudentRecord, GradeError> {
    StudentRecord::new(name, roll, subjects)
}

/// A graded record: what gets stored and reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkSheet {
    /// The underlying record.
    record: StudentRecord,
    /// Policy the result was computed under.
    policy: GradingPolicy,
    /// The computed grade.
    result: GradeResult,
}

impl MarkSheet {
    /// Grades `record` under `policy`.
    pub fn new(record: StudentRecord, policy: GradingPolicy) -> Self {
        let result = record.classify(policy);
        tracing::debug!(
            "Graded {} ({}) at {:.2}% under {}: {}",
            record.name(),
            record.roll(),
            record.percentage(),
            policy,
            result
        );
        Self {
            record,
            policy,
            result,
        }
    }

    /// The underlying record.
    pub fn record(&self) -> &StudentRecord {
        &self.record
    }

    /// Policy the result was computed under.
    pub fn policy(&self) -> GradingPolicy {
        self.policy
    }

    /// The computed grade and status.
    pub fn result(&self) -> GradeResult {
        self.result
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Total and percentage computation plus form-input checks.
pub mod engine;
/// Error types raised while grading.
pub mod error;
/// Named threshold tables.
pub mod policy;
/// Shared record and result types.
pub mod results;
/// Ranked roster ordering.
pub mod roster;

pub use engine::{MARKS_RANGE, Summary, compute_summary, parse_marks, validate_subject};
pub use error::{GradeError, ValidationError};
pub use policy::{GradingPolicy, UnknownPolicy, classify};
pub use results::{
    GradeResult, LetterGrade, MarkSheet, Status, StudentRecord, SubjectScore, student_record,
};
pub use roster::{Rankable, rank_roster};

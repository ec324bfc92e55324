//! # marks
//!
//! Grades students from their per-subject marks, keeps the results in an
//! append-only store and lists them as a ranked roster.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Pluggable login check for roster administration
pub mod auth;
/// Environment-driven runtime configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For all things related to grading
pub mod grade;
/// Printable reports and tables
pub mod report;
/// Marks-entry controller and admin session
pub mod session;
/// Where graded records are kept
pub mod store;

pub use grade::{
    GradeError, GradeResult, GradingPolicy, LetterGrade, MarkSheet, Status, StudentRecord,
    SubjectScore, ValidationError, classify, compute_summary, rank_roster,
};

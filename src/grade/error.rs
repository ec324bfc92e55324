#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Problems with a single piece of user input. The caller is expected to show
/// these to the user and ask for a correction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Marks fell outside the 0-100 scale.
    #[error("Marks for `{subject}` must be between 0 and 100, got {marks}.")]
    MarksOutOfRange {
        /// Subject the marks were entered for.
        subject: String,
        /// The rejected value.
        marks:   i64,
    },
    /// Marks were not a whole number.
    #[error("Marks for `{subject}` must be a whole number, got `{raw}`.")]
    NotAnInteger {
        /// Subject the marks were entered for.
        subject: String,
        /// The raw text that failed to parse.
        raw:     String,
    },
    /// A subject was entered without a name.
    #[error("Subject name cannot be empty.")]
    EmptySubjectName,
    /// Student name or roll number was left blank.
    #[error("Enter the student's name and roll number.")]
    MissingStudentInfo,
}

/// An enum to represent possible errors when computing a student's result.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// Some input was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No subjects were supplied, so there is nothing to average.
    #[error("Add at least one subject before computing a result.")]
    EmptyInput,
    /// The marks add up to more than a total can hold.
    #[error("Too many subjects to total.")]
    TotalOverflow,
}

impl GradeError {
    /// True for input problems that a corrected entry would fix.
    pub fn is_validation(&self) -> bool {
        matches!(self, GradeError::Validation(_))
    }
}

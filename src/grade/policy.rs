#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::results::{GradeResult, LetterGrade, Status};

/// One row of a threshold table: percentages at or above `floor` earn
/// `grade` and `status`.
type Band = (f64, LetterGrade, Option<Status>);

/// Desktop analyzer bands, highest first. The last band catches everything.
const SIX_LEVEL: &[Band] = &[
    (90.0, LetterGrade::APlus, Some(Status::Excellent)),
    (80.0, LetterGrade::A, Some(Status::VeryGood)),
    (70.0, LetterGrade::B, Some(Status::Good)),
    (60.0, LetterGrade::C, Some(Status::Average)),
    (40.0, LetterGrade::D, Some(Status::Pass)),
    (f64::NEG_INFINITY, LetterGrade::F, Some(Status::Fail)),
];

/// Records dashboard bands, highest first. No status column.
const FOUR_LEVEL: &[Band] = &[
    (90.0, LetterGrade::APlus, None),
    (75.0, LetterGrade::A, None),
    (60.0, LetterGrade::B, None),
    (40.0, LetterGrade::C, None),
    (f64::NEG_INFINITY, LetterGrade::Fail, None),
];

/// A named, fixed threshold table mapping a percentage to a grade.
///
/// The two tables disagree on their boundaries and are kept apart on
/// purpose; pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradingPolicy {
    /// A+/A/B/C/D/F with a status for each band.
    #[default]
    SixLevel,
    /// A+/A/B/C/Fail, grade only.
    FourLevel,
}

impl GradingPolicy {
    /// Every policy, in a stable order.
    pub const ALL: [GradingPolicy; 2] = [GradingPolicy::SixLevel, GradingPolicy::FourLevel];

    /// Returns the threshold table backing this policy.
    fn bands(&self) -> &'static [Band] {
        match self {
            GradingPolicy::SixLevel => SIX_LEVEL,
            GradingPolicy::FourLevel => FOUR_LEVEL,
        }
    }

    /// Maps `percentage` to a grade. Lower bounds are inclusive; NaN falls
    /// through to the bottom band.
    pub fn classify(&self, percentage: f64) -> GradeResult {
        let bands = self.bands();
        let (_, grade, status) = bands
            .iter()
            .find(|(floor, _, _)| percentage >= *floor)
            .unwrap_or(&bands[bands.len() - 1]);

        GradeResult {
            grade:  *grade,
            status: *status,
        }
    }

    /// Name used on the command line and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            GradingPolicy::SixLevel => "six-level",
            GradingPolicy::FourLevel => "four-level",
        }
    }
}

impl Display for GradingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a policy name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown grading policy `{0}`, expected `six-level` or `four-level`.")]
pub struct UnknownPolicy(pub String);

impl FromStr for GradingPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "six-level" | "sixlevel" | "six" | "desktop" => Ok(GradingPolicy::SixLevel),
            "four-level" | "fourlevel" | "four" | "web" => Ok(GradingPolicy::FourLevel),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Shorthand for `policy.classify(percentage)`.
pub fn classify(policy: GradingPolicy, percentage: f64) -> GradeResult {
    policy.classify(percentage)
}

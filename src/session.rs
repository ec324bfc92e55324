#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::Result;

use crate::{
    auth::{AuthError, Authenticator},
    grade::{
        GradeError, GradingPolicy, MarkSheet, StudentRecord, SubjectScore, ValidationError,
        parse_marks, rank_roster,
    },
    report::Reporter,
    store::{Storage, StudentDocument},
};

/// Collects one student's details and marks, then grades them.
///
/// Owns everything a marks-entry screen needs; callers hold one of these
/// instead of keeping subject lists in globals.
#[derive(Debug, Clone, Default)]
pub struct MarksAnalyzer {
    /// Student name as entered.
    name:        String,
    /// Roll number as entered.
    roll:        String,
    /// Subjects added so far, in entry order.
    subjects:    Vec<SubjectScore>,
    /// Policy used by [`MarksAnalyzer::analyze`].
    policy:      GradingPolicy,
    /// Text of the most recent report.
    last_report: Option<String>,
}

impl MarksAnalyzer {
    /// Creates an empty analyzer grading under `policy`.
    pub fn new(policy: GradingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sets the student's name and roll number.
    pub fn set_student(&mut self, name: &str, roll: &str) {
        self.name = name.trim().to_string();
        self.roll = roll.trim().to_string();
    }

    /// Switches the grading policy for later analyses.
    pub fn set_policy(&mut self, policy: GradingPolicy) {
        self.policy = policy;
    }

    /// Current grading policy.
    pub fn policy(&self) -> GradingPolicy {
        self.policy
    }

    /// Adds a subject from raw form text. Nothing is added when either field
    /// is rejected.
    pub fn add_subject(
        &mut self,
        name: &str,
        marks: &str,
    ) -> Result<&SubjectScore, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        let marks = parse_marks(name, marks)?;

        self.subjects.push(SubjectScore::new(name, marks));
        Ok(self.subjects.last().expect("subject just pushed"))
    }

    /// Subjects added so far.
    pub fn subjects(&self) -> &[SubjectScore] {
        &self.subjects
    }

    /// Removes every subject and the last report, keeping name and roll.
    pub fn clear_subjects(&mut self) {
        self.subjects.clear();
        self.last_report = None;
    }

    /// Grades the current entries without side effects.
    pub fn analyze(&self) -> Result<MarkSheet, GradeError> {
        if self.name.is_empty() || self.roll.is_empty() {
            return Err(ValidationError::MissingStudentInfo.into());
        }
        let record = StudentRecord::new(&self.name, &self.roll, self.subjects.clone())?;
        Ok(MarkSheet::new(record, self.policy))
    }

    /// Grades the current entries, renders the report and appends the result
    /// to `store`. The rendered report is kept for [`MarksAnalyzer::last_report`].
    pub fn submit<R, S>(&mut self, reporter: &R, store: &mut S) -> Result<MarkSheet>
    where
        R: Reporter + ?Sized,
        S: Storage + ?Sized,
    {
        let sheet = self.analyze()?;
        let report = reporter.render(&sheet)?;
        self.last_report = Some(report);
        store.save(&sheet)?;
        Ok(sheet)
    }

    /// Text of the most recent report, if any.
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }
}

/// A logged-in administrator of the student records.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Who logged in.
    username: String,
}

impl AdminSession {
    /// Checks the pair with `auth` and opens a session on success.
    pub fn login<A>(auth: &A, username: &str, password: &str) -> Result<Self, AuthError>
    where
        A: Authenticator + ?Sized,
    {
        if auth.verify(username, password) {
            tracing::info!("{username} logged in");
            Ok(Self {
                username: username.to_string(),
            })
        } else {
            tracing::warn!("Refused login for {username}");
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Who logged in.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Grades a new student under `policy` and stores the result.
    pub fn add_student<S>(
        &self,
        store: &mut S,
        name: &str,
        roll: &str,
        subjects: Vec<SubjectScore>,
        policy: GradingPolicy,
    ) -> Result<MarkSheet>
    where
        S: Storage + ?Sized,
    {
        if name.trim().is_empty() || roll.trim().is_empty() {
            return Err(GradeError::from(ValidationError::MissingStudentInfo).into());
        }
        let record = StudentRecord::new(name.trim(), roll.trim(), subjects)?;
        let sheet = MarkSheet::new(record, policy);
        store.save(&sheet)?;
        Ok(sheet)
    }

    /// Every stored student with a percentage, best first.
    pub fn roster<S>(&self, store: &S) -> Result<Vec<StudentDocument>>
    where
        S: Storage + ?Sized,
    {
        let all = store.list_all()?;
        let total = all.len();
        let ranked = rank_roster(all);
        tracing::info!("Listing {} of {} stored students", ranked.len(), total);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::StaticCredentials,
        grade::{LetterGrade, Status},
        report::TextReporter,
        store::MemoryStore,
    };

    #[test]
    fn add_subject_validates_input() {
        let mut analyzer = MarksAnalyzer::new(GradingPolicy::SixLevel);

        assert_eq!(
            analyzer.add_subject("  ", "50").unwrap_err(),
            ValidationError::EmptySubjectName
        );
        assert!(matches!(
            analyzer.add_subject("Math", "ninety"),
            Err(ValidationError::NotAnInteger { .. })
        ));
        assert!(matches!(
            analyzer.add_subject("Math", "101"),
            Err(ValidationError::MarksOutOfRange { marks: 101, .. })
        ));
        assert!(analyzer.subjects().is_empty());

        let added = analyzer.add_subject(" Math ", " 88").expect("valid");
        assert_eq!(added, &SubjectScore::new("Math", 88));
    }

    #[test]
    fn analyze_requires_name_roll_and_subjects() {
        let mut analyzer = MarksAnalyzer::new(GradingPolicy::SixLevel);
        analyzer.add_subject("Math", "80").expect("valid");
        assert_eq!(
            analyzer.analyze().unwrap_err(),
            GradeError::Validation(ValidationError::MissingStudentInfo)
        );

        analyzer.set_student("Asha", "17");
        analyzer.clear_subjects();
        assert_eq!(analyzer.analyze().unwrap_err(), GradeError::EmptyInput);
    }

    #[test]
    fn submit_renders_and_saves() {
        let mut analyzer = MarksAnalyzer::new(GradingPolicy::SixLevel);
        analyzer.set_student("Asha", "17");
        for (subject, marks) in [("Math", "80"), ("Science", "70"), ("English", "90")] {
            analyzer.add_subject(subject, marks).expect("valid");
        }

        let mut store = MemoryStore::new();
        let sheet = analyzer
            .submit(&TextReporter::default(), &mut store)
            .expect("submit");

        assert_eq!(sheet.record().total(), 240);
        assert_eq!(sheet.result().grade, LetterGrade::A);
        assert_eq!(sheet.result().status, Some(Status::VeryGood));
        assert_eq!(store.len(), 1);
        assert!(
            analyzer
                .last_report()
                .expect("report")
                .contains("Percentage  : 80.00%")
        );
    }

    #[test]
    fn admin_login_and_roster() {
        let auth = StaticCredentials::new("admin", "pw");
        assert_eq!(
            AdminSession::login(&auth, "admin", "nope").unwrap_err(),
            AuthError::InvalidCredentials
        );

        let session = AdminSession::login(&auth, "admin", "pw").expect("login");
        assert_eq!(session.username(), "admin");

        let mut store = MemoryStore::with_documents([StudentDocument {
            name: "Half".into(),
            ..Default::default()
        }]);
        session
            .add_student(
                &mut store,
                "Ben",
                "2",
                vec![SubjectScore::new("Math", 74)],
                GradingPolicy::FourLevel,
            )
            .expect("add");
        session
            .add_student(
                &mut store,
                "Ada",
                "1",
                vec![SubjectScore::new("Math", 90)],
                GradingPolicy::FourLevel,
            )
            .expect("add");

        let roster = session.roster(&store).expect("roster");
        assert_eq!(
            roster.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            ["Ada", "Ben"]
        );
        assert_eq!(roster[1].grade.as_deref(), Some("B"));
    }

    #[test]
    fn add_student_rejects_bad_marks() {
        let session =
            AdminSession::login(&StaticCredentials::new("a", "b"), "a", "b").expect("login");
        let mut store = MemoryStore::new();
        let err = session
            .add_student(
                &mut store,
                "Ben",
                "2",
                vec![SubjectScore::new("Math", 150)],
                GradingPolicy::FourLevel,
            )
            .unwrap_err();

        assert!(
            err.downcast_ref::<GradeError>()
                .is_some_and(GradeError::is_validation)
        );
        assert!(store.is_empty());
    }
}

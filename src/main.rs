#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # marks
//! ## Introduction
//!
//! A student marks analyzer: enter per-subject marks, get a total,
//! percentage, grade and printable report, and keep a ranked roster of every
//! student graded so far.
//!
//! ## Configuration
//!
//! Settings come from the environment (a `.env` file in the working
//! directory is read first): `MARKS_POLICY`, `MARKS_CSV_PATH`,
//! `MARKS_DOCUMENT_PATH`, `MARKS_ADMIN_USER` and `MARKS_ADMIN_PASSWORD`.

use anyhow::{Context, Result, bail};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use marks::{
    config,
    grade::{GradeResult, GradingPolicy, SubjectScore, ValidationError, parse_marks},
    report::{ReportOptions, Reporter, TextReporter, render_roster},
    session::{AdminSession, MarksAnalyzer},
    store::{CsvStore, DocumentStore, Storage},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Student details shared by `analyze` and `add`.
#[derive(Debug, Clone)]
struct StudentArgs {
    /// Student name
    name:     String,
    /// Roll number
    roll:     String,
    /// Raw `SUBJECT=MARKS` pairs
    subjects: Vec<String>,
}

/// Admin credentials given on the command line.
#[derive(Debug, Clone)]
struct LoginArgs {
    /// Username
    user:     String,
    /// Password
    password: String,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade one student, print the report and append it to the CSV store
    Analyze {
        /// Who and what to grade
        student: StudentArgs,
        /// Policy override
        policy:  Option<GradingPolicy>,
        /// Skip writing to the CSV store
        no_save: bool,
        /// Append a subjects table
        table:   bool,
        /// Append a marks chart
        chart:   bool,
    },
    /// Grade one student and add them to the document store
    Add {
        /// Who and what to grade
        student: StudentArgs,
        /// Policy override
        policy:  Option<GradingPolicy>,
        /// Admin login
        login:   LoginArgs,
    },
    /// Print the ranked roster
    Roster {
        /// Read the CSV store instead of the document store
        csv:   bool,
        /// Print JSON instead of a table
        json:  bool,
        /// Admin login
        login: LoginArgs,
    },
    /// Print the grade for a percentage
    Classify {
        /// Percentage to classify
        percentage: f64,
        /// Policy override
        policy:     Option<GradingPolicy>,
    },
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses student name, roll number and subjects
    fn student() -> impl Parser<StudentArgs> {
        let name = long("name")
            .short('n')
            .help("Student name")
            .argument::<String>("NAME");
        let roll = long("roll")
            .short('r')
            .help("Roll number")
            .argument::<String>("ROLL");
        let subjects = long("subject")
            .short('s')
            .help("Subject and marks, eg. Math=80; repeat for each subject")
            .argument::<String>("SUBJECT=MARKS")
            .many();
        construct!(StudentArgs {
            name,
            roll,
            subjects
        })
    }

    /// parses an optional policy override
    fn policy() -> impl Parser<Option<GradingPolicy>> {
        long("policy")
            .short('p')
            .help("Grading policy: six-level or four-level")
            .argument::<GradingPolicy>("POLICY")
            .optional()
    }

    /// parses admin credentials
    fn login() -> impl Parser<LoginArgs> {
        let user = long("user")
            .short('u')
            .help("Admin username")
            .argument::<String>("USER");
        let password = long("password")
            .help("Admin password")
            .argument::<String>("PASSWORD");
        construct!(LoginArgs { user, password })
    }

    let analyze = {
        let student = student();
        let policy = policy();
        let no_save = long("no-save")
            .help("Do not append the result to the CSV store")
            .switch();
        let table = long("table").help("Include a table of subjects").switch();
        let chart = long("chart").help("Include a marks chart").switch();
        construct!(Cmd::Analyze {
            student,
            policy,
            no_save,
            table,
            chart
        })
        .to_options()
        .command("analyze")
        .help("Grade a student and print the result report")
    };

    let add = {
        let student = student();
        let policy = policy();
        let login = login();
        construct!(Cmd::Add {
            student,
            policy,
            login
        })
        .to_options()
        .command("add")
        .help("Grade a student and add them to the student records")
    };

    let roster = {
        let csv = long("csv")
            .help("Read the CSV store instead of the student records")
            .switch();
        let json = long("json").help("Print JSON").switch();
        let login = login();
        construct!(Cmd::Roster { csv, json, login })
            .to_options()
            .command("roster")
            .help("List stored students, best percentage first")
    };

    let classify = {
        let percentage = positional::<f64>("PERCENTAGE").help("Percentage to classify");
        let policy = policy();
        construct!(Cmd::Classify { percentage, policy })
            .to_options()
            .command("classify")
            .help("Print the grade for a percentage")
    };

    let cmd = construct!([analyze, add, roster, classify]);

    cmd.to_options()
        .descr("Student marks analyzer")
        .run()
}

/// Splits a `SUBJECT=MARKS` argument.
fn split_subject(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((subject, marks)) => Ok((subject, marks)),
        None => bail!("Expected SUBJECT=MARKS, got `{raw}`"),
    }
}

/// Parses one `SUBJECT=MARKS` argument, checking the name before the marks
/// the same way [`MarksAnalyzer::add_subject`] does.
fn parse_subject(raw: &str) -> Result<SubjectScore> {
    let (subject, marks) = split_subject(raw)?;
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(ValidationError::EmptySubjectName.into());
    }
    let marks = parse_marks(subject, marks)?;
    Ok(SubjectScore::new(subject, marks))
}

/// Parses every `SUBJECT=MARKS` argument into a subject score.
fn parse_subjects(raw: &[String]) -> Result<Vec<SubjectScore>> {
    raw.iter().map(|arg| parse_subject(arg)).collect()
}

/// Prints a grade, coloured by whether it passes.
fn print_result(result: GradeResult) {
    let failed = result.status.is_some_and(|s| !s.is_pass())
        || matches!(result.grade, marks::LetterGrade::F | marks::LetterGrade::Fail);
    let text = result.to_string();
    if failed {
        println!("{}", text.red().bold());
    } else {
        println!("{}", text.green().bold());
    }
}

fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();
    let cfg = config::ensure_initialized().context("Could not load configuration")?;

    match cmd {
        Cmd::Analyze {
            student,
            policy,
            no_save,
            table,
            chart,
        } => {
            let mut analyzer = MarksAnalyzer::new(policy.unwrap_or(cfg.policy()));
            analyzer.set_student(&student.name, &student.roll);
            for arg in &student.subjects {
                let (subject, marks) = split_subject(arg)?;
                analyzer.add_subject(subject, marks)?;
            }

            let reporter =
                TextReporter::new(ReportOptions::builder().subjects(table).chart(chart).build());
            let (sheet, report) = if no_save {
                let sheet = analyzer.analyze()?;
                let report = reporter.render(&sheet)?;
                (sheet, report)
            } else {
                let mut store = CsvStore::new(cfg.csv_path());
                let sheet = analyzer.submit(&reporter, &mut store)?;
                let report = analyzer.last_report().unwrap_or_default().to_string();
                (sheet, report)
            };

            println!("{report}");
            print_result(sheet.result());
        }
        Cmd::Add {
            student,
            policy,
            login,
        } => {
            let session = AdminSession::login(&cfg.authenticator(), &login.user, &login.password)?;
            let subjects = parse_subjects(&student.subjects)?;
            let mut store = DocumentStore::new(cfg.document_path());
            let sheet = session.add_student(
                &mut store,
                &student.name,
                &student.roll,
                subjects,
                policy.unwrap_or(cfg.policy()),
            )?;

            println!(
                "Added {} ({}): {:.2}%",
                sheet.record().name(),
                sheet.record().roll(),
                sheet.record().percentage()
            );
            print_result(sheet.result());
        }
        Cmd::Roster { csv, json, login } => {
            let session = AdminSession::login(&cfg.authenticator(), &login.user, &login.password)?;
            let store: Box<dyn Storage> = if csv {
                Box::new(CsvStore::new(cfg.csv_path()))
            } else {
                Box::new(DocumentStore::new(cfg.document_path()))
            };

            let ranked = session.roster(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("{}", render_roster(&ranked));
            }
        }
        Cmd::Classify { percentage, policy } => {
            let policy = policy.unwrap_or(cfg.policy());
            println!("{percentage:.2}% under {policy}:");
            print_result(policy.classify(percentage));
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation(err: anyhow::Error) -> ValidationError {
        err.downcast::<ValidationError>().expect("validation error")
    }

    #[test]
    fn parses_subject_arguments() {
        let subjects =
            parse_subjects(&["Math=80".to_string(), " Physical Science = 91 ".to_string()])
                .expect("valid subjects");
        assert_eq!(
            subjects,
            vec![
                SubjectScore::new("Math", 80),
                SubjectScore::new("Physical Science", 91)
            ]
        );
    }

    #[test]
    fn missing_separator_is_rejected() {
        let err = parse_subject("Math80").unwrap_err();
        assert!(err.to_string().contains("SUBJECT=MARKS"));
    }

    #[test]
    fn blank_name_is_rejected_before_marks() {
        assert_eq!(
            validation(parse_subject("=80").unwrap_err()),
            ValidationError::EmptySubjectName
        );
        assert_eq!(
            validation(parse_subject(" =abc").unwrap_err()),
            ValidationError::EmptySubjectName
        );
    }

    #[test]
    fn bad_marks_are_rejected() {
        assert!(matches!(
            validation(parse_subject("Math=").unwrap_err()),
            ValidationError::NotAnInteger { .. }
        ));
        assert!(matches!(
            validation(parse_subject("Bio=abc").unwrap_err()),
            ValidationError::NotAnInteger { .. }
        ));
        assert!(matches!(
            validation(parse_subject("Bio=101").unwrap_err()),
            ValidationError::MarksOutOfRange { marks: 101, .. }
        ));
    }

    #[test]
    fn analyzer_and_argument_parsing_agree() {
        for raw in ["=80", "Math=", "Bio=abc", "Bio=150", "Art=77"] {
            let (subject, marks) = split_subject(raw).expect("has separator");
            let mut analyzer = MarksAnalyzer::new(GradingPolicy::SixLevel);
            let from_analyzer = analyzer.add_subject(subject, marks).cloned();
            let from_args = parse_subject(raw).map_err(validation);
            assert_eq!(from_analyzer, from_args, "{raw}");
        }
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write;

use anyhow::Result;
use itertools::Itertools;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};
use typed_builder::TypedBuilder;

use crate::{
    constants::{CHART_WIDTH, REPORT_RULE, REPORT_TITLE},
    grade::{MarkSheet, SubjectScore},
    store::StudentDocument,
};

/// Turns a graded sheet into something a person reads.
pub trait Reporter {
    /// Renders `sheet`.
    fn render(&self, sheet: &MarkSheet) -> Result<String>;
}

/// Optional sections of a text report.
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
#[builder(field_defaults(default))]
#[builder(doc)]
pub struct ReportOptions {
    /// Append a table of the subjects and their marks.
    pub subjects: bool,
    /// Append a bar chart of the marks.
    pub chart:    bool,
}

/// The plain "STUDENT RESULT REPORT" block.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter {
    /// Extra sections to append.
    options: ReportOptions,
}

impl TextReporter {
    /// Creates a reporter with the given sections.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }
}

impl Reporter for TextReporter {
    fn render(&self, sheet: &MarkSheet) -> Result<String> {
        let record = sheet.record();
        let result = sheet.result();
        let mut out = String::new();

        writeln!(out, "{REPORT_TITLE}")?;
        writeln!(out, "{REPORT_RULE}")?;
        writeln!(out, "Name        : {}", record.name())?;
        writeln!(out, "Roll No     : {}", record.roll())?;
        writeln!(out)?;
        writeln!(out, "Total Marks : {}", record.total())?;
        writeln!(out, "Average     : {:.2}", record.percentage())?;
        writeln!(out, "Percentage  : {:.2}%", record.percentage())?;
        writeln!(out, "Grade       : {}", result.grade)?;
        if let Some(status) = result.status {
            writeln!(out, "Status      : {status}")?;
        }

        if self.options.subjects {
            writeln!(out)?;
            writeln!(out, "{}", render_subjects(record.subjects()))?;
        }
        if self.options.chart {
            writeln!(out)?;
            write!(out, "{}", render_marks_chart(record.subjects()))?;
        }

        Ok(out)
    }
}

/// Renders subjects and their marks as a table.
pub fn render_subjects(subjects: &[SubjectScore]) -> String {
    Table::new(subjects)
        .with(Panel::header("Marks"))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

/// Renders one horizontal bar per subject, scaled so 100 marks fill
/// [`CHART_WIDTH`] characters.
pub fn render_marks_chart(subjects: &[SubjectScore]) -> String {
    let label_width = subjects
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    let bars = subjects.iter().map(|subject| {
        let marks = subject.marks.clamp(0, 100) as usize;
        let filled = (marks * CHART_WIDTH + 50) / 100;
        format!(
            "{:<label_width$} | {}{} {}\n",
            subject.name,
            "#".repeat(filled),
            " ".repeat(CHART_WIDTH - filled),
            subject.marks
        )
    });
    format!("Marks Analysis\n{}", bars.format(""))
}

#[derive(Tabled)]
/// A row of the roster table.
struct RosterRow {
    #[tabled(rename = "Rank")]
    /// * `rank`: 1-based position
    rank:       usize,
    #[tabled(rename = "Name")]
    /// * `name`: student name
    name:       String,
    #[tabled(rename = "Roll")]
    /// * `roll`: roll number
    roll:       String,
    #[tabled(rename = "Total")]
    /// * `total`: sum of marks, `-` when not stored
    total:      String,
    #[tabled(rename = "Percentage")]
    /// * `percentage`: average mark to two places
    percentage: String,
    #[tabled(rename = "Grade")]
    /// * `grade`: stored grade, `-` when not stored
    grade:      String,
}

/// Renders an already ranked roster as a table.
pub fn render_roster(ranked: &[StudentDocument]) -> String {
    let rows: Vec<RosterRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, doc)| RosterRow {
            rank:       i + 1,
            name:       doc.name.clone(),
            roll:       doc.roll.clone(),
            total:      doc
                .total
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into()),
            percentage: doc
                .percentage
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "-".into()),
            grade:      doc.grade.clone().unwrap_or_else(|| "-".into()),
        })
        .collect();

    Table::new(&rows)
        .with(Panel::header("Student Roster"))
        .with(Panel::footer(format!("Students: {}", rows.len())))
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(24).keep_words(true)))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::{GradingPolicy, StudentRecord};

    fn sheet(policy: GradingPolicy) -> MarkSheet {
        let record = StudentRecord::new(
            "Asha",
            "17",
            vec![
                SubjectScore::new("Math", 80),
                SubjectScore::new("Science", 70),
                SubjectScore::new("English", 91),
            ],
        )
        .expect("valid record");
        MarkSheet::new(record, policy)
    }

    #[test]
    fn text_report_layout() {
        let text = TextReporter::default()
            .render(&sheet(GradingPolicy::SixLevel))
            .expect("render");

        let expected = "STUDENT RESULT REPORT\n\
                        -----------------------------\n\
                        Name        : Asha\n\
                        Roll No     : 17\n\
                        \n\
                        Total Marks : 241\n\
                        Average     : 80.33\n\
                        Percentage  : 80.33%\n\
                        Grade       : A\n\
                        Status      : Very Good\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn four_level_report_has_no_status() {
        let text = TextReporter::default()
            .render(&sheet(GradingPolicy::FourLevel))
            .expect("render");
        assert!(text.contains("Grade       : A\n"));
        assert!(!text.contains("Status"));
    }

    #[test]
    fn optional_sections() {
        let options = ReportOptions::builder().subjects(true).chart(true).build();
        let text = TextReporter::new(options)
            .render(&sheet(GradingPolicy::SixLevel))
            .expect("render");
        assert!(text.contains("Science"));
        assert!(text.contains("Marks Analysis"));
    }

    #[test]
    fn chart_scales_bars() {
        let chart =
            render_marks_chart(&[SubjectScore::new("Art", 100), SubjectScore::new("PE", 0)]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].matches('#').count(), CHART_WIDTH);
        assert_eq!(lines[2].matches('#').count(), 0);
        assert!(lines[2].starts_with("PE "));
    }

    #[test]
    fn roster_table_lists_ranks() {
        let docs = vec![
            StudentDocument {
                name: "Ada".into(),
                roll: "1".into(),
                total: Some(270),
                percentage: Some(90.0),
                grade: Some("A+".into()),
                ..Default::default()
            },
            StudentDocument {
                name: "Ben".into(),
                roll: "2".into(),
                percentage: Some(55.5),
                ..Default::default()
            },
        ];
        let table = render_roster(&docs);
        assert!(table.contains("Student Roster"));
        assert!(table.contains("90.00"));
        assert!(table.contains("55.50"));
        assert!(table.contains("Students: 2"));
    }
}

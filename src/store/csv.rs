#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

use anyhow::{Context, Result};
use itertools::Itertools;

use super::{Storage, StudentDocument};
use crate::{constants::CSV_HEADER, grade::MarkSheet};

/// One row per student with the columns of [`CSV_HEADER`]. Subject-level
/// marks are not kept.
#[derive(Debug, Clone)]
pub struct CsvStore {
    /// File the rows are appended to.
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Quotes `field` if it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Joins `fields` into one CSV line.
fn to_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = fields.into_iter().map(escape).join(",");
    line.push('\n');
    line
}

/// Splits CSV text into rows of fields, honouring quoted fields.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\r', false) => {}
            ('\n', false) => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            (c, _) => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));
    rows
}

/// Column positions found in the header row.
struct Columns {
    /// `Name` column.
    name:       Option<usize>,
    /// `Roll` column.
    roll:       Option<usize>,
    /// `Total` column.
    total:      Option<usize>,
    /// `Percentage` column.
    percentage: Option<usize>,
    /// `Grade` column.
    grade:      Option<usize>,
    /// `Status` column.
    status:     Option<usize>,
}

impl Columns {
    /// Locates each known column in `header`, case-insensitively.
    fn locate(header: &[String]) -> Self {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Self {
            name:       find("Name"),
            roll:       find("Roll"),
            total:      find("Total"),
            percentage: find("Percentage"),
            grade:      find("Grade"),
            status:     find("Status"),
        }
    }

    /// Converts one data row, or `None` when it has no student name.
    fn document(&self, row: &[String]) -> Option<StudentDocument> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let name = cell(self.name)?.to_string();
        Some(StudentDocument {
            id: None,
            name,
            roll: cell(self.roll).unwrap_or_default().to_string(),
            subjects: Vec::new(),
            total: cell(self.total).and_then(|s| s.parse().ok()),
            percentage: cell(self.percentage).and_then(|s| s.parse().ok()),
            grade: cell(self.grade).map(str::to_string),
            status: cell(self.status).map(str::to_string),
        })
    }
}

impl Storage for CsvStore {
    fn save(&mut self, sheet: &MarkSheet) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Could not open {}", self.path.display()))?;
        let is_empty = file
            .metadata()
            .with_context(|| format!("Could not inspect {}", self.path.display()))?
            .len()
            == 0;

        let mut out = String::new();
        if is_empty {
            out.push_str(&to_line(CSV_HEADER));
        }

        let record = sheet.record();
        let result = sheet.result();
        let total = record.total().to_string();
        let percentage = format!("{:?}", record.percentage());
        let grade = result.grade.to_string();
        let status = result.status.map(|s| s.to_string()).unwrap_or_default();
        out.push_str(&to_line([
            record.name(),
            record.roll(),
            total.as_str(),
            percentage.as_str(),
            grade.as_str(),
            status.as_str(),
        ]));

        file.write_all(out.as_bytes())
            .with_context(|| format!("Could not write to {}", self.path.display()))?;
        tracing::info!("Saved {} ({}) to {}", record.name(), record.roll(), self.path.display());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<StudentDocument>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {}", self.path.display()))?;
        let mut rows = parse_rows(&text).into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };

        let columns = Columns::locate(&header);
        let mut docs = Vec::new();
        for (line, row) in rows.enumerate() {
            match columns.document(&row) {
                Some(doc) => docs.push(doc),
                None => tracing::warn!(
                    "Skipping row {} of {}: no student name",
                    line + 2,
                    self.path.display()
                ),
            }
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(escape("Asha"), "Asha");
        assert_eq!(escape("Rao, Asha"), "\"Rao, Asha\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn parses_quoted_fields() {
        let rows = parse_rows("Name,Roll\r\n\"Rao, Asha\",\"1\"\"a\"\n\nBen,2");
        assert_eq!(
            rows,
            vec![
                vec!["Name".to_string(), "Roll".to_string()],
                vec!["Rao, Asha".to_string(), "1\"a".to_string()],
                vec!["Ben".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn blank_cells_become_none() {
        let header: Vec<String> = CSV_HEADER.iter().map(|s| s.to_string()).collect();
        let columns = Columns::locate(&header);
        let row: Vec<String> = ["Ben", "2", "", " ", "B", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let doc = columns.document(&row).expect("named row");
        assert_eq!(doc.total, None);
        assert_eq!(doc.percentage, None);
        assert_eq!(doc.grade.as_deref(), Some("B"));
        assert_eq!(doc.status, None);
    }
}

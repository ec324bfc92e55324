#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::{MarkSheet, Rankable, SubjectScore};

/// Append-only tabular file, one row per graded student.
pub mod csv;
/// Append-only JSON-lines document collection.
pub mod document;
/// Tolerant field readers for stored documents.
mod lenient;
/// In-process store.
pub mod memory;

pub use self::{csv::CsvStore, document::DocumentStore, memory::MemoryStore};

/// A student record as read back from storage.
///
/// Everything but the name may be missing or mistyped so that half-written
/// entries still load; the roster simply leaves out entries without a
/// percentage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentDocument {
    /// Identifier assigned by the store, if it assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id:         Option<Uuid>,
    /// Student name.
    pub name:       String,
    /// Roll number.
    #[serde(default, deserialize_with = "lenient::plain_text")]
    pub roll:       String,
    /// Per-subject marks.
    #[serde(default, deserialize_with = "lenient::subjects")]
    pub subjects:   Vec<SubjectScore>,
    /// Sum of marks.
    #[serde(default, deserialize_with = "lenient::total")]
    pub total:      Option<u64>,
    /// Average mark.
    #[serde(default, deserialize_with = "lenient::percentage")]
    pub percentage: Option<f64>,
    /// Letter grade as stored.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub grade:      Option<String>,
    /// Status as stored, for policies that have one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub status:     Option<String>,
}

impl From<&MarkSheet> for StudentDocument {
    fn from(sheet: &MarkSheet) -> Self {
        let record = sheet.record();
        let result = sheet.result();
        Self {
            id:         None,
            name:       record.name().to_string(),
            roll:       record.roll().to_string(),
            subjects:   record.subjects().to_vec(),
            total:      Some(record.total()),
            percentage: Some(record.percentage()),
            grade:      Some(result.grade.to_string()),
            status:     result.status.map(|s| s.to_string()),
        }
    }
}

impl Rankable for StudentDocument {
    fn percentage(&self) -> Option<f64> {
        self.percentage
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn roll(&self) -> &str {
        &self.roll
    }
}

/// Durable home for graded records.
pub trait Storage {
    /// Appends `sheet`. Existing entries are never rewritten.
    fn save(&mut self, sheet: &MarkSheet) -> Result<()>;

    /// Reads back every stored entry, in storage order.
    fn list_all(&self) -> Result<Vec<StudentDocument>>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn save(&mut self, sheet: &MarkSheet) -> Result<()> {
        (**self).save(sheet)
    }

    fn list_all(&self) -> Result<Vec<StudentDocument>> {
        (**self).list_all()
    }
}

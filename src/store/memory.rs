#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use uuid::Uuid;

use super::{Storage, StudentDocument};
use crate::grade::MarkSheet;

/// Keeps documents in a `Vec`; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Saved documents, oldest first.
    documents: Vec<StudentDocument>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `documents`, as if read from elsewhere.
    pub fn with_documents(documents: impl IntoIterator<Item = StudentDocument>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Storage for MemoryStore {
    fn save(&mut self, sheet: &MarkSheet) -> Result<()> {
        let mut doc = StudentDocument::from(sheet);
        doc.id = Some(Uuid::new_v4());
        self.documents.push(doc);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<StudentDocument>> {
        Ok(self.documents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::{GradingPolicy, StudentRecord, SubjectScore, rank_roster};

    fn sheet(name: &str, marks: i64) -> MarkSheet {
        let record = StudentRecord::new(name, "1", vec![SubjectScore::new("Math", marks)])
            .expect("valid record");
        MarkSheet::new(record, GradingPolicy::FourLevel)
    }

    #[test]
    fn saves_and_ranks() {
        let mut store = MemoryStore::with_documents([StudentDocument {
            name: "Partial".into(),
            ..Default::default()
        }]);
        store.save(&sheet("Low", 35)).expect("save");
        store.save(&sheet("High", 95)).expect("save");

        let docs = store.list_all().expect("list");
        assert_eq!(docs.len(), 3);
        assert!(docs[1].id.is_some());
        assert_eq!(docs[1].grade.as_deref(), Some("Fail"));

        let ranked = rank_roster(docs);
        assert_eq!(
            ranked.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            ["High", "Low"]
        );
    }
}

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

use anyhow::{Context, Result};
use uuid::Uuid;

use super::{Storage, StudentDocument};
use crate::grade::MarkSheet;

/// A collection of student documents kept as one JSON object per line.
///
/// Each saved document gets a fresh id. Lines that fail to parse are skipped
/// with a warning when listing.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// File the documents are appended to.
    path: PathBuf,
}

impl DocumentStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for DocumentStore {
    fn save(&mut self, sheet: &MarkSheet) -> Result<()> {
        let mut doc = StudentDocument::from(sheet);
        let id = Uuid::new_v4();
        doc.id = Some(id);

        let mut line = serde_json::to_string(&doc).context("Could not serialize student")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Could not open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Could not write to {}", self.path.display()))?;

        tracing::info!("Added {} ({}) as document {}", doc.name, doc.roll, id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<StudentDocument>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {}", self.path.display()))?;

        let mut docs = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StudentDocument>(line) {
                Ok(doc) => docs.push(doc),
                Err(e) => tracing::warn!(
                    "Skipping line {} of {}: {}",
                    idx + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(docs)
    }
}

//! Antenna manifest: identity plus the ordered set of pattern records.

use super::PatternRecord;
use serde::{Deserialize, Serialize};

/// Contents of one archive's `antenna.paf`, with gain tables once read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Antenna name. Empty if the document has none.
    pub name: String,
    pub manufacturer: String,
    pub version: String,
    /// Records keyed by `file`, in first-insertion order.
    pub patterns: Vec<PatternRecord>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            manufacturer: manufacturer.into(),
            version: version.into(),
            patterns: Vec::new(),
        }
    }

    /// Insert a record. A record with the same `file` is replaced in place,
    /// keeping its original position.
    pub fn insert(&mut self, record: PatternRecord) {
        match self.patterns.iter_mut().find(|p| p.file == record.file) {
            Some(existing) => *existing = record,
            None => self.patterns.push(record),
        }
    }

    /// Look up a record by entry name.
    pub fn get(&self, file: &str) -> Option<&PatternRecord> {
        self.patterns.iter().find(|p| p.file == file)
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the manifest lists no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

use serde::Serialize;

use super::{column, records};

const MIN_COLUMNS: usize = 2;

/// A missing-value code and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMapEntry {
    pub code: String,
    pub label: String,
}

/// Missing-value codes from `DFmissing_map`.
///
/// Until a map is loaded, the generic `*` code labelled `Missing Value` is
/// the only entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMap {
    entries: Vec<MissingMapEntry>,
}

impl Default for MissingMap {
    fn default() -> Self {
        Self {
            entries: vec![MissingMapEntry {
                code: "*".to_string(),
                label: "Missing Value".to_string(),
            }],
        }
    }
}

impl MissingMap {
    pub fn load(&mut self, text: &str) -> usize {
        self.entries = records(text, MIN_COLUMNS)
            .map(|record| MissingMapEntry {
                code: column(&record, 0).to_string(),
                label: column(&record, 1).to_string(),
            })
            .collect();
        self.entries.len()
    }

    pub fn entries(&self) -> &[MissingMapEntry] {
        &self.entries
    }

    /// Label for an exact code match.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label.as_str())
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable record identifier (UUID v4 string). Rows refer to records by this,
/// never by position, since filtering and deletion reorder positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new() -> Self {
        RecordId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Create a new, not-yet-completed record with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Record {
            id: RecordId::new(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Completion-status predicate used by the list and the footer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

/// Filters in display order, with their button labels.
pub const FILTERS: [(Filter, &str); 3] = [
    (Filter::All, "All"),
    (Filter::Active, "Active"),
    (Filter::Completed, "Completed"),
];

impl Filter {
    pub fn matches(self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !record.completed,
            Filter::Completed => record.completed,
        }
    }

    pub fn label(self) -> &'static str {
        FILTERS
            .iter()
            .find(|(f, _)| *f == self)
            .map(|(_, label)| *label)
            .unwrap_or("All")
    }

    /// Message shown when the filtered list is empty
    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No todos yet. Add one above!",
            Filter::Active => "No active todos!",
            Filter::Completed => "No completed todos!",
        }
    }

    /// Parse a filter name (case-insensitive)
    pub fn parse(s: &str) -> Option<Filter> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" | "done" => Some(Filter::Completed),
            _ => None,
        }
    }
}

/// Record totals for the footer counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl RecordCounts {
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// The ordered record collection. This is the in-memory source of truth; the
/// file store persists it after each mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList {
    #[serde(rename = "todos", default)]
    pub records: Vec<Record>,
}

impl RecordList {
    /// Append a record. Callers validate the text first.
    pub fn push(&mut self, text: impl Into<String>) -> RecordId {
        let record = Record::new(text);
        let id = record.id.clone();
        self.records.push(record);
        id
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn find_mut(&mut self, id: &RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    /// Flip completion. Returns false if the id is unknown.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.toggle();
                true
            }
            None => false,
        }
    }

    /// Replace a record's text. Returns false if the id is unknown.
    pub fn set_text(&mut self, id: &RecordId, text: &str) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a record. Returns false if the id is unknown (e.g. already removed).
    pub fn remove(&mut self, id: &RecordId) -> bool {
        match self.records.iter().position(|r| &r.id == id) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every completed record, returning how many were removed
    pub fn remove_completed(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.completed);
        before - self.records.len()
    }

    /// Snapshot of the records matching `filter`, in list order
    pub fn filtered(&self, filter: Filter) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> RecordCounts {
        let completed = self.records.iter().filter(|r| r.completed).count();
        RecordCounts {
            total: self.records.len(),
            active: self.records.len() - completed,
            completed,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

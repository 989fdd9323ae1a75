use std::path::{Path, PathBuf};

use crate::io::store_io::{self, StoreError};
use crate::model::config::DEFAULT_MAX_LENGTH;
use crate::model::record::{Filter, Record, RecordCounts, RecordId, RecordList};

/// The record store as seen by the UI: filtered snapshots plus mutations keyed
/// by stable id.
///
/// Mutations return `Ok(false)` for an unknown id (nothing changes, nothing is
/// written) and `Ok(true)` once applied. A `StoreError` for which
/// [`StoreError::is_write_failure`] holds means the in-memory list *was*
/// updated but could not be persisted; callers surface it as a notification
/// and keep showing the in-memory state. Text that is blank after trimming
/// or longer than the store's cap is refused before anything changes.
pub trait RecordStore {
    /// Records matching `filter`, in list order
    fn list_filtered(&self, filter: Filter) -> Vec<Record>;
    fn counts(&self) -> RecordCounts;
    /// Add a record with trimmed `text`. Empty or over-long text is rejected.
    fn add(&mut self, text: &str) -> Result<RecordId, StoreError>;
    fn toggle(&mut self, id: &RecordId) -> Result<bool, StoreError>;
    /// Rename to trimmed `text`. Empty or over-long text is rejected.
    fn rename(&mut self, id: &RecordId, text: &str) -> Result<bool, StoreError>;
    /// Returns `Ok(false)` on a second call for the same id.
    fn delete(&mut self, id: &RecordId) -> Result<bool, StoreError>;
    /// Remove all completed records, returning how many went away
    fn clear_completed(&mut self) -> Result<usize, StoreError>;
}

/// Trim, then reject empty text and text over `max_length` characters
pub fn validate_text(text: &str, max_length: usize) -> Result<&str, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(StoreError::EmptyText)
    } else if trimmed.chars().count() > max_length {
        Err(StoreError::TooLong { max: max_length })
    } else {
        Ok(trimmed)
    }
}

/// In-memory store with no persistence, capped at [`DEFAULT_MAX_LENGTH`]
impl RecordStore for RecordList {
    fn list_filtered(&self, filter: Filter) -> Vec<Record> {
        self.filtered(filter)
    }

    fn counts(&self) -> RecordCounts {
        RecordList::counts(self)
    }

    fn add(&mut self, text: &str) -> Result<RecordId, StoreError> {
        let text = validate_text(text, DEFAULT_MAX_LENGTH)?;
        Ok(self.push(text))
    }

    fn toggle(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        Ok(RecordList::toggle(self, id))
    }

    fn rename(&mut self, id: &RecordId, text: &str) -> Result<bool, StoreError> {
        let text = validate_text(text, DEFAULT_MAX_LENGTH)?;
        Ok(self.set_text(id, text))
    }

    fn delete(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        Ok(self.remove(id))
    }

    fn clear_completed(&mut self) -> Result<usize, StoreError> {
        Ok(self.remove_completed())
    }
}

/// A record list backed by a JSON file, saved after every applied mutation
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    list: RecordList,
    max_length: usize,
}

impl FileStore {
    /// Load the store from `path` (missing file = empty store)
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let list = store_io::load_records(path)?;
        Ok(FileStore {
            path: path.to_path_buf(),
            list,
            max_length: DEFAULT_MAX_LENGTH,
        })
    }

    /// Cap new and renamed text at `max_length` characters. Records already
    /// longer than that are kept as they are.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &RecordList {
        &self.list
    }

    fn persist(&self) -> Result<(), StoreError> {
        store_io::save_records(&self.path, &self.list)
    }

    /// Persist if `applied`, passing `applied` through
    fn persist_if(&self, applied: bool) -> Result<bool, StoreError> {
        if applied {
            self.persist()?;
        }
        Ok(applied)
    }

    /// Find a record by full id or by a unique id prefix (CLI convenience)
    pub fn resolve_id(&self, needle: &str) -> Option<RecordId> {
        if let Some(r) = self.list.records.iter().find(|r| r.id.as_str() == needle) {
            return Some(r.id.clone());
        }
        let mut matches = self
            .list
            .records
            .iter()
            .filter(|r| r.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) if !needle.is_empty() => Some(only.id.clone()),
            _ => None,
        }
    }
}

impl RecordStore for FileStore {
    fn list_filtered(&self, filter: Filter) -> Vec<Record> {
        self.list.filtered(filter)
    }

    fn counts(&self) -> RecordCounts {
        self.list.counts()
    }

    fn add(&mut self, text: &str) -> Result<RecordId, StoreError> {
        let text = validate_text(text, self.max_length)?;
        let id = self.list.push(text);
        tracing::info!(id = %id, "added record");
        self.persist()?;
        Ok(id)
    }

    fn toggle(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let applied = RecordList::toggle(&mut self.list, id);
        tracing::debug!(id = %id, applied, "toggle");
        self.persist_if(applied)
    }

    fn rename(&mut self, id: &RecordId, text: &str) -> Result<bool, StoreError> {
        let text = validate_text(text, self.max_length)?;
        let applied = self.list.set_text(id, text);
        tracing::debug!(id = %id, applied, "rename");
        self.persist_if(applied)
    }

    fn delete(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let applied = self.list.remove(id);
        tracing::info!(id = %id, applied, "delete");
        self.persist_if(applied)
    }

    fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let removed = self.list.remove_completed();
        tracing::info!(removed, "cleared completed records");
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }
}

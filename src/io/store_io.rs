use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::record::RecordList;

/// Error type for the record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo text cannot be empty")]
    EmptyText,
    #[error("todo text is longer than {max} characters")]
    TooLong { max: usize },
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize records: {0}")]
    SerializeError(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the text was refused before anything changed
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::EmptyText | StoreError::TooLong { .. })
    }

    /// True for failures of the durable write, where the in-memory list has
    /// already been updated.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            StoreError::WriteError { .. } | StoreError::SerializeError(_)
        )
    }
}

/// Load records from a JSON data file. A missing or empty file is an empty list.
pub fn load_records(path: &Path) -> Result<RecordList, StoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file missing, starting empty");
        return Ok(RecordList::default());
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(RecordList::default());
    }
    let list: RecordList =
        serde_json::from_str(&content).map_err(|e| StoreError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::info!(path = %path.display(), count = list.len(), "loaded records");
    Ok(list)
}

/// Save records as pretty-printed JSON, creating the parent directory if needed.
pub fn save_records(path: &Path, list: &RecordList) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(list)?;
    let write = || -> io::Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        atomic_write(path, content.as_bytes())
    };
    write().map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "record write failed");
        StoreError::WriteError {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    tracing::debug!(path = %path.display(), count = list.len(), "saved records");
    Ok(())
}

/// Write through a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        let mut list = RecordList::default();
        let id = list.push("buy milk");
        list.push("walk dog");
        list.toggle(&id);

        save_records(&path, &list).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let list = load_records(&dir.path().join("nope.json")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(&path, "").unwrap();
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(&path, "not json {{{").unwrap();
        assert!(matches!(
            load_records(&path),
            Err(StoreError::ParseError { .. })
        ));
    }

    #[test]
    fn reads_original_data_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(
            &path,
            r#"{
  "todos": [
    {
      "id": "0b4f3c1e-8d1a-4a4e-9a55-0f3f6c1c2b11",
      "text": "Test todo",
      "completed": true,
      "created_at": "2024-03-01T12:30:00Z"
    }
  ]
}"#,
        )
        .unwrap();
        let list = load_records(&path).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.records[0].text, "Test todo");
        assert!(list.records[0].completed);
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/todos.json");
        save_records(&path, &RecordList::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let err = save_records(&blocker.join("todos.json"), &RecordList::default()).unwrap_err();
        assert!(err.is_write_failure());
    }
}

//! Best-effort table mirror.
//!
//! Holds the same four columns as the row store in one JSON table that
//! is fully rewritten on every successful append. The mirror has its own
//! duplicate check (external id and date only, no legacy fallback) and
//! is allowed to diverge from the authoritative row store.

use crate::event::AttendanceEvent;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableStoreError {
    #[error("table store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("table store json: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct TableStore {
    path: PathBuf,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `event` unless a row with the same external id and date is
    /// already present. Returns whether the table was rewritten.
    ///
    /// A missing file is created containing only the new row. There is
    /// no partial-write protocol; the whole table is rewritten in place.
    pub fn append_if_absent(&self, event: &AttendanceEvent) -> Result<bool, TableStoreError> {
        if !self.path.exists() {
            self.write_table(&[event.clone()])?;
            return Ok(true);
        }

        let mut table: Vec<AttendanceEvent> = serde_json::from_slice(&fs::read(&self.path)?)?;
        let duplicate = table
            .iter()
            .any(|row| row.external_id == event.external_id && row.date == event.date);
        if duplicate {
            return Ok(false);
        }

        table.push(event.clone());
        self.write_table(&table)?;
        Ok(true)
    }

    /// Read the whole table. A missing file is an empty table.
    pub fn load(&self) -> Result<Vec<AttendanceEvent>, TableStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&fs::read(&self.path)?)?)
    }

    fn write_table(&self, rows: &[AttendanceEvent]) -> Result<(), TableStoreError> {
        fs::write(&self.path, serde_json::to_vec_pretty(rows)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, name: &str, date: &str, time: &str) -> AttendanceEvent {
        AttendanceEvent {
            external_id: id.to_string(),
            display_name: name.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_creates_file_with_single_row() {
        let tmp = tempfile::tempdir().unwrap();
        let store = TableStore::new(tmp.path().join("attendance.json"));
        let row = event("007", "Ada", "2026-03-09", "08:00:00");

        assert!(store.append_if_absent(&row).unwrap());
        assert_eq!(store.load().unwrap(), vec![row]);
    }

    #[test]
    fn test_duplicate_by_external_id_and_date_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let store = TableStore::new(tmp.path().join("attendance.json"));
        store
            .append_if_absent(&event("007", "Ada", "2026-03-09", "08:00:00"))
            .unwrap();

        let skipped = store
            .append_if_absent(&event("007", "Ada", "2026-03-09", "09:30:00"))
            .unwrap();
        assert!(!skipped);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_no_name_keyed_fallback() {
        // Unlike the row store, the mirror keys only on external id.
        let tmp = tempfile::tempdir().unwrap();
        let store = TableStore::new(tmp.path().join("attendance.json"));
        store
            .append_if_absent(&event("007", "Ada", "2026-03-09", "08:00:00"))
            .unwrap();

        assert!(store
            .append_if_absent(&event("008", "Ada", "2026-03-09", "08:05:00"))
            .unwrap());
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_column_names_match_row_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = TableStore::new(tmp.path().join("attendance.json"));
        store
            .append_if_absent(&event("007", "Ada", "2026-03-09", "08:00:00"))
            .unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        for column in ["Student ID", "Name", "Date", "Time"] {
            assert!(text.contains(column), "missing column {column}");
        }
    }

    #[test]
    fn test_corrupt_table_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("attendance.json");
        std::fs::write(&path, b"not json").unwrap();
        let store = TableStore::new(&path);

        let err = store
            .append_if_absent(&event("007", "Ada", "2026-03-09", "08:00:00"))
            .unwrap_err();
        assert!(matches!(err, TableStoreError::Json(_)));
    }
}

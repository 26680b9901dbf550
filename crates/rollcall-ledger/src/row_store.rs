//! Authoritative append-only row store.
//!
//! Delimited text with header `Student ID,Name,Date,Time`. Older files
//! may contain 3-column rows (`Name,Date,Time`); those stay parseable
//! and participate in duplicate detection through a name-keyed fallback.

use crate::event::{AttendanceEvent, NO_EXTERNAL_ID};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HEADER: [&str; 4] = ["Student ID", "Name", "Date", "Time"];

#[derive(Error, Debug)]
pub enum RowStoreError {
    #[error("row store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("row store parse: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RowStore {
    path: PathBuf,
}

impl RowStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan every existing row for a duplicate of `event`.
    ///
    /// 4-column rows match on `(external id, date)`; any other row with
    /// at least 3 columns is treated as legacy and matches on
    /// `(display name, date)`. A missing file has no duplicates.
    pub fn contains(&self, event: &AttendanceEvent) -> Result<bool, RowStoreError> {
        if !self.path.exists() {
            return Ok(false);
        }

        let mut reader = reader(&self.path)?;
        for record in reader.records() {
            let record = record?;
            let matched = if record.len() == 4 {
                record.get(0) == Some(event.external_id.as_str())
                    && record.get(2) == Some(event.date.as_str())
            } else if record.len() >= 3 {
                record.get(0) == Some(event.display_name.as_str())
                    && record.get(1) == Some(event.date.as_str())
            } else {
                false
            };
            if matched {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Append `event`, writing the header first when creating the file.
    pub fn append(&self, event: &AttendanceEvent) -> Result<(), RowStoreError> {
        let existed = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);

        if !existed {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            event.external_id.as_str(),
            event.display_name.as_str(),
            event.date.as_str(),
            event.time.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }

    /// Read every data row back, normalizing legacy 3-column rows with
    /// the [`NO_EXTERNAL_ID`] sentinel. The header row is skipped.
    pub fn load(&self) -> Result<Vec<AttendanceEvent>, RowStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        let mut reader = reader(&self.path)?;
        for record in reader.records() {
            let record = record?;
            match record.len() {
                4 => {
                    if record.iter().eq(HEADER.iter().copied()) {
                        continue;
                    }
                    rows.push(AttendanceEvent {
                        external_id: record[0].to_string(),
                        display_name: record[1].to_string(),
                        date: record[2].to_string(),
                        time: record[3].to_string(),
                    });
                }
                3 => rows.push(AttendanceEvent {
                    external_id: NO_EXTERNAL_ID.to_string(),
                    display_name: record[0].to_string(),
                    date: record[1].to_string(),
                    time: record[2].to_string(),
                }),
                _ => continue,
            }
        }
        Ok(rows)
    }
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>, csv::Error> {
    // No header handling here: the duplicate scan looks at every line,
    // and mixed row widths require a flexible reader.
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
}

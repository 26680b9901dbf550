//! rollcall-ledger — Deduplicated daily attendance records in dual stores.
//!
//! One authoritative append-only row store (delimited text) plus a
//! best-effort table mirror (JSON). The row store alone decides whether
//! an event is a duplicate; a mirror failure is reported and swallowed,
//! never fatal to the event.
//!
//! Known limitation: the check-then-write sequence is not atomic against
//! a second process touching the same store files; concurrent writers
//! can produce duplicate or lost rows.

mod event;
mod row_store;
mod table_store;

pub use event::{AttendanceEvent, DATE_FORMAT, NO_EXTERNAL_ID, TIME_FORMAT};
pub use row_store::{RowStore, RowStoreError, HEADER};
pub use table_store::{TableStore, TableStoreError};

use chrono::{Local, NaiveDateTime};
use rollcall_core::Identity;
use std::path::{Path, PathBuf};

/// The dual-store attendance ledger.
pub struct Ledger {
    rows: RowStore,
    table: TableStore,
}

impl Ledger {
    pub fn new(row_path: impl Into<PathBuf>, table_path: impl Into<PathBuf>) -> Self {
        Self {
            rows: RowStore::new(row_path),
            table: TableStore::new(table_path),
        }
    }

    pub fn row_path(&self) -> &Path {
        self.rows.path()
    }

    pub fn table_path(&self) -> &Path {
        self.table.path()
    }

    /// Record attendance for `identity` at `when` unless an event for the
    /// same dedup key and date already exists. Returns whether a row was
    /// written.
    ///
    /// The row store is checked and written first; a row-store failure is
    /// fatal to the event. The mirror is only touched after a successful
    /// row append, and any mirror failure (or mirror-side duplicate) is
    /// reported and swallowed — the call still succeeds.
    pub fn record_if_absent(
        &self,
        identity: &Identity,
        when: NaiveDateTime,
    ) -> Result<bool, RowStoreError> {
        let event = AttendanceEvent::new(identity, when);

        if self.rows.contains(&event)? {
            tracing::debug!(
                id = %event.external_id,
                name = %event.display_name,
                date = %event.date,
                "already recorded today"
            );
            return Ok(false);
        }

        self.rows.append(&event)?;
        tracing::info!(
            id = %event.external_id,
            name = %event.display_name,
            date = %event.date,
            time = %event.time,
            "attendance recorded"
        );

        match self.table.append_if_absent(&event) {
            Ok(true) => {}
            Ok(false) => tracing::debug!(
                id = %event.external_id,
                date = %event.date,
                "mirror already holds this entry; stores diverge"
            ),
            Err(err) => tracing::warn!(
                error = %err,
                path = %self.table.path().display(),
                "mirror update failed; row store remains authoritative"
            ),
        }

        Ok(true)
    }

    /// Record attendance for `identity` at the current local time.
    pub fn record_now(&self, identity: &Identity) -> Result<bool, RowStoreError> {
        self.record_if_absent(identity, Local::now().naive_local())
    }

    /// Read all rows back from the authoritative store.
    pub fn load_rows(&self) -> Result<Vec<AttendanceEvent>, RowStoreError> {
        self.rows.load()
    }
}

use chrono::NaiveDateTime;
use rollcall_core::Identity;
use serde::{Deserialize, Serialize};

/// Sentinel external id written for identities that have none.
pub const NO_EXTERNAL_ID: &str = "N/A";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One attendance record as persisted: all four fields are stored as
/// text, exactly as they appear in the row store. Dedup keys compare
/// these strings, never re-parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    #[serde(rename = "Student ID")]
    pub external_id: String,
    #[serde(rename = "Name")]
    pub display_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
}

impl AttendanceEvent {
    /// Build the event for `identity` at `when`, substituting the
    /// [`NO_EXTERNAL_ID`] sentinel for a missing external id.
    pub fn new(identity: &Identity, when: NaiveDateTime) -> Self {
        Self {
            external_id: identity
                .external_id
                .clone()
                .unwrap_or_else(|| NO_EXTERNAL_ID.to_string()),
            display_name: identity.display_name.clone(),
            date: when.date().format(DATE_FORMAT).to_string(),
            time: when.time().format(TIME_FORMAT).to_string(),
        }
    }
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{Gender, Identity};
use super::location::Coordinates;
use super::status::AttendanceStatus;

/// A unique identifier for a stored record.
/// Assigned by the store at append time, never by the capture flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
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

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An attendance record waiting to be submitted. The capture flow owns it
/// exclusively until the store accepts the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    pub class: String,
    pub gender: Gender,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub location: Coordinates,
}

impl RecordDraft {
    /// Compose a draft from the pieces a capture session collects. Both
    /// `date` and `time` come from `submitted_at`, the moment of submission
    /// rather than of scan, so they are consistent by construction.
    pub fn compose(
        identity: &Identity,
        status: AttendanceStatus,
        location: Coordinates,
        submitted_at: NaiveDateTime,
    ) -> Self {
        let time = submitted_at.time();
        // The ledger carries minute precision only.
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self {
            name: identity.name.clone(),
            class: identity.class.clone(),
            gender: identity.gender,
            status,
            date: submitted_at.date(),
            time,
            location,
        }
    }
}

/// A persisted attendance entry. Immutable after creation; each submission
/// appends exactly one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub name: String,
    pub class: String,
    pub gender: Gender,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub location: Coordinates,
}

impl AttendanceRecord {
    pub fn from_draft(id: RecordId, draft: &RecordDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            class: draft.class.clone(),
            gender: draft.gender,
            status: draft.status,
            date: draft.date,
            time: draft.time,
            location: draft.location,
        }
    }
}

/// Times travel as "HH:MM" (24h local) on the wire and in the ledger.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

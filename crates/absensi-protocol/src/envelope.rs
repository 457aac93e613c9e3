use serde::{Deserialize, Serialize};

use absensi_core::model::AttendanceRecord;

use crate::error::ProtocolError;

/// Gateway reply to a write request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteReply {
    pub fn ok(record: AttendanceRecord) -> Self {
        Self {
            success: true,
            record: Some(record),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            record: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<AttendanceRecord, ProtocolError> {
        if self.success {
            self.record.ok_or_else(|| {
                ProtocolError::MalformedReply("success reply without a record".into())
            })
        } else {
            Err(ProtocolError::Gateway(
                self.error.unwrap_or_else(|| "unknown gateway error".into()),
            ))
        }
    }
}

/// Gateway reply to a read-all request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<AttendanceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadReply {
    pub fn ok(records: Vec<AttendanceRecord>) -> Self {
        Self {
            success: true,
            records: Some(records),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            records: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<Vec<AttendanceRecord>, ProtocolError> {
        if self.success {
            self.records.ok_or_else(|| {
                ProtocolError::MalformedReply("success reply without records".into())
            })
        } else {
            Err(ProtocolError::Gateway(
                self.error.unwrap_or_else(|| "unknown gateway error".into()),
            ))
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Attendance status for a single record: present, excused, sick, or absent
/// without excuse. Every capture session starts at `Hadir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Hadir,
    Izin,
    Sakit,
    Alpha,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Hadir,
        AttendanceStatus::Izin,
        AttendanceStatus::Sakit,
        AttendanceStatus::Alpha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Hadir => "Hadir",
            AttendanceStatus::Izin => "Izin",
            AttendanceStatus::Sakit => "Sakit",
            AttendanceStatus::Alpha => "Alpha",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hadir" => Ok(AttendanceStatus::Hadir),
            "izin" => Ok(AttendanceStatus::Izin),
            "sakit" => Ok(AttendanceStatus::Sakit),
            "alpha" => Ok(AttendanceStatus::Alpha),
            other => Err(CoreError::Parse(format!("unknown status: {other}"))),
        }
    }
}

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use absensi_core::model::{AttendanceRecord, AttendanceStatus, Gender};

/// Records per gender value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub putra: usize,
    pub putri: usize,
}

/// Records per status value. All four buckets are always present, zero when
/// a status never occurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub hadir: usize,
    pub izin: usize,
    pub sakit: usize,
    pub alpha: usize,
}

impl StatusCounts {
    pub fn get(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Hadir => self.hadir,
            AttendanceStatus::Izin => self.izin,
            AttendanceStatus::Sakit => self.sakit,
            AttendanceStatus::Alpha => self.alpha,
        }
    }
}

/// The dashboard aggregates, computed in one pass over the full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    #[serde(rename = "genderData")]
    pub gender: GenderCounts,
    #[serde(rename = "statusData")]
    pub status: StatusCounts,
    /// Distinct student names across all records. A student attending
    /// multiple times counts once.
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    /// Records dated `today`.
    #[serde(rename = "todayCount")]
    pub today_count: usize,
}

impl DashboardStats {
    /// `today` is the evaluation date, injected so the computation stays
    /// pure.
    pub fn compute(records: &[AttendanceRecord], today: NaiveDate) -> Self {
        let mut stats = DashboardStats::default();
        let mut names = HashSet::new();
        for record in records {
            match record.gender {
                Gender::Putra => stats.gender.putra += 1,
                Gender::Putri => stats.gender.putri += 1,
            }
            match record.status {
                AttendanceStatus::Hadir => stats.status.hadir += 1,
                AttendanceStatus::Izin => stats.status.izin += 1,
                AttendanceStatus::Sakit => stats.status.sakit += 1,
                AttendanceStatus::Alpha => stats.status.alpha += 1,
            }
            names.insert(record.name.as_str());
            if record.date == today {
                stats.today_count += 1;
            }
        }
        stats.total_students = names.len();
        stats
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::CoreError;
use crate::model::{AttendanceRecord, RecordDraft, RecordId};

use super::AttendanceStore;

/// In-memory store for tests and demos. Flip `set_fail_writes` to behave
/// like an unreachable gateway.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AttendanceRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl AttendanceStore for MemoryStore {
    fn append(&self, draft: &RecordDraft) -> Result<AttendanceRecord, CoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(CoreError::Store("gateway unreachable".into()));
        }
        let record = AttendanceRecord::from_draft(RecordId::new(), draft);
        let mut records = self
            .records
            .lock()
            .map_err(|_| CoreError::Store("store lock poisoned".into()))?;
        records.push(record.clone());
        Ok(record)
    }

    fn read_all(&self) -> Result<Vec<AttendanceRecord>, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| CoreError::Store("store lock poisoned".into()))?;
        Ok(records.clone())
    }
}

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::CoreError;
use crate::model::{AttendanceRecord, RecordDraft, RecordId};

use super::AttendanceStore;

/// Append-only JSON-lines ledger: one attendance record per line, guarded by
/// advisory file locks so concurrent kiosks on the same machine do not
/// interleave writes.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Open an existing ledger. Missing file means `absensi init` has not
    /// been run here.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if !path.exists() {
            return Err(CoreError::NotInitialized);
        }
        Ok(Self { path })
    }

    /// Create the ledger file (and parent directories) if needed.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    pub fn is_initialized(path: &Path) -> bool {
        path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AttendanceStore for LedgerStore {
    fn append(&self, draft: &RecordDraft) -> Result<AttendanceRecord, CoreError> {
        let record = AttendanceRecord::from_draft(RecordId::new(), draft);
        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.lock_exclusive()?;
        let written = writeln!(file, "{line}").and_then(|_| file.flush());
        let _ = FileExt::unlock(&file);
        written?;

        Ok(record)
    }

    fn read_all(&self) -> Result<Vec<AttendanceRecord>, CoreError> {
        let file = File::open(&self.path).map_err(|_| CoreError::NotInitialized)?;
        file.lock_shared()?;

        let mut records = Vec::new();
        for line in BufReader::new(&file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AttendanceRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping unreadable ledger line: {e}"),
            }
        }

        let _ = FileExt::unlock(&file);
        Ok(records)
    }
}

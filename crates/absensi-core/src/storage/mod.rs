pub mod ledger;
pub mod memory;

pub use ledger::LedgerStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{AttendanceRecord, RecordDraft};

/// The persistence gateway: an opaque append/read store for attendance
/// records. Identity assignment and duplicate prevention live behind this
/// boundary, not in the capture flow.
pub trait AttendanceStore {
    /// Persist a finished draft, assigning its id. Exactly one record per
    /// call; no client-side retry.
    fn append(&self, draft: &RecordDraft) -> Result<AttendanceRecord, CoreError>;

    /// The full stored record set, in append order.
    fn read_all(&self) -> Result<Vec<AttendanceRecord>, CoreError>;
}

impl<S: AttendanceStore + ?Sized> AttendanceStore for Arc<S> {
    fn append(&self, draft: &RecordDraft) -> Result<AttendanceRecord, CoreError> {
        (**self).append(draft)
    }

    fn read_all(&self) -> Result<Vec<AttendanceRecord>, CoreError> {
        (**self).read_all()
    }
}

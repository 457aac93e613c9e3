pub mod identity;
pub mod location;
pub mod record;
pub mod status;

pub use identity::{Gender, Identity};
pub use location::Coordinates;
pub use record::{AttendanceRecord, RecordDraft, RecordId};
pub use status::AttendanceStatus;

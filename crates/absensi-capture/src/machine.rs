use chrono::NaiveDateTime;

use absensi_core::model::{
    AttendanceRecord, AttendanceStatus, Coordinates, Identity, RecordDraft,
};

use crate::error::{messages, CaptureError, MissingInput};
use crate::parser::parse_identity;

/// Where a capture session is in its scan → confirm → submit → success
/// cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for a token scan. Initial state, and where every cycle ends.
    Scanning,
    /// Identity collected; awaiting a status choice and the submit command.
    Confirming,
    /// The write is in flight at the gateway.
    Submitting,
    /// The write was accepted; the success display is up until the timer
    /// returns the session to `Scanning`.
    Succeeded,
}

/// One input to the session reducer. Each async adapter posts its outcome as
/// an event; the reducer is the only mutator of session state, so arrival
/// order between scanner and location provider never races.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The token decoder produced raw text.
    ScanDecoded(String),
    /// The token decoder failed; the scanner itself keeps running.
    ScanFailed(String),
    /// The location provider finished, with a real reading or the fallback.
    LocationResolved(Coordinates),
    /// Operator changed the pending status.
    StatusSelected(AttendanceStatus),
    /// Operator abandoned the pending identity.
    Cancel,
    /// Operator asked to persist the pending record.
    Submit,
    /// The gateway accepted the write.
    WriteAccepted(AttendanceRecord),
    /// The gateway rejected the write or was unreachable.
    WriteRejected(String),
    /// The success display window is over.
    ResetElapsed,
}

/// Work the runtime performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand the finished draft to the persistence gateway.
    BeginWrite(RecordDraft),
    /// Arm the auto-reset timer for the success display window.
    ScheduleReset,
}

/// The capture state machine. Owns the in-progress record exclusively until
/// the store accepts it; after that the in-memory copy is only a display
/// mirror, discarded on reset.
#[derive(Debug)]
pub struct CaptureMachine {
    state: CaptureState,
    pending: Option<Identity>,
    status: AttendanceStatus,
    location: Option<Coordinates>,
    error: Option<String>,
    last_stored: Option<AttendanceRecord>,
}

impl Default for CaptureMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureMachine {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Scanning,
            pending: None,
            status: AttendanceStatus::Hadir,
            location: None,
            error: None,
            last_stored: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// The scanned identity awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&Identity> {
        self.pending.as_ref()
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// The current operator-facing error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The persisted record mirrored during the success display.
    pub fn last_stored(&self) -> Option<&AttendanceRecord> {
        self.last_stored.as_ref()
    }

    /// Apply one event. `now` is the instant the event is processed; a draft
    /// composed here is stamped with it, so its date and time reflect the
    /// moment of submission rather than of scan.
    pub fn apply(&mut self, event: SessionEvent, now: NaiveDateTime) -> Option<Effect> {
        match (self.state, event) {
            // Location acquisition runs independently of the machine's state
            // and populates coordinates exactly once; the first result wins.
            (_, SessionEvent::LocationResolved(coords)) => {
                if self.location.is_none() {
                    self.location = Some(coords);
                }
                None
            }
            (CaptureState::Scanning, SessionEvent::ScanDecoded(raw)) => {
                match parse_identity(&raw) {
                    Ok(identity) => {
                        self.pending = Some(identity);
                        self.error = None;
                        self.state = CaptureState::Confirming;
                    }
                    Err(e) => {
                        // Stay in Scanning; the decoder keeps running.
                        self.error = Some(e.user_message().to_string());
                    }
                }
                None
            }
            (CaptureState::Scanning, SessionEvent::ScanFailed(message)) => {
                self.error = Some(message);
                None
            }
            (CaptureState::Scanning, SessionEvent::Submit) => {
                self.block_submit(MissingInput::Identity);
                None
            }
            (CaptureState::Confirming, SessionEvent::StatusSelected(status)) => {
                self.status = status;
                None
            }
            (CaptureState::Confirming, SessionEvent::Cancel) => {
                self.clear_pending();
                self.state = CaptureState::Scanning;
                None
            }
            (CaptureState::Confirming, SessionEvent::Submit) => self.try_submit(now),
            (CaptureState::Submitting, SessionEvent::WriteAccepted(record)) => {
                self.last_stored = Some(record);
                self.error = None;
                self.state = CaptureState::Succeeded;
                Some(Effect::ScheduleReset)
            }
            (CaptureState::Submitting, SessionEvent::WriteRejected(reason)) => {
                // Back to Confirming, not Scanning: the operator retries the
                // submission without re-scanning, identity and status intact.
                tracing::warn!("Gateway rejected write: {reason}");
                self.error = Some(messages::WRITE_FAILED.to_string());
                self.state = CaptureState::Confirming;
                None
            }
            (CaptureState::Succeeded, SessionEvent::ResetElapsed) => {
                self.clear_pending();
                self.last_stored = None;
                self.state = CaptureState::Scanning;
                None
            }
            // Everything else (operator input during the success window,
            // stale write results, scans while confirming, a second submit
            // while a write is in flight) is ignored without a transition.
            _ => None,
        }
    }

    fn try_submit(&mut self, now: NaiveDateTime) -> Option<Effect> {
        let Some(identity) = self.pending.as_ref() else {
            self.block_submit(MissingInput::Identity);
            return None;
        };
        let Some(location) = self.location else {
            self.block_submit(MissingInput::Location);
            return None;
        };
        let draft = RecordDraft::compose(identity, self.status, location, now);
        self.error = None;
        self.state = CaptureState::Submitting;
        Some(Effect::BeginWrite(draft))
    }

    fn block_submit(&mut self, missing: MissingInput) {
        let blocked = CaptureError::SubmitBlocked { missing };
        self.error = Some(blocked.user_message().to_string());
    }

    fn clear_pending(&mut self) {
        self.pending = None;
        self.status = AttendanceStatus::Hadir;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absensi_core::model::Gender;
    use chrono::NaiveDate;

    const PAYLOAD: &str = r#"{"name":"Ahmad Rizki","class":"10A","gender":"Putra"}"#;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap()
    }

    fn scanned_machine() -> CaptureMachine {
        let mut machine = CaptureMachine::new();
        machine.apply(SessionEvent::ScanDecoded(PAYLOAD.into()), now());
        machine
    }

    #[test]
    fn test_scan_success_moves_to_confirming() {
        let machine = scanned_machine();
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert_eq!(machine.pending().unwrap().name, "Ahmad Rizki");
        assert_eq!(machine.status(), AttendanceStatus::Hadir);
        assert!(machine.error().is_none());
    }

    #[test]
    fn test_scan_failure_stays_scanning_and_recovers() {
        let mut machine = CaptureMachine::new();
        machine.apply(SessionEvent::ScanDecoded("bukan json".into()), now());
        assert_eq!(machine.state(), CaptureState::Scanning);
        assert_eq!(machine.error(), Some(messages::INVALID_TOKEN));

        // The decoder was not torn down; the next scan works.
        machine.apply(SessionEvent::ScanDecoded(PAYLOAD.into()), now());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert!(machine.error().is_none());
    }

    #[test]
    fn test_scanner_error_is_surfaced() {
        let mut machine = CaptureMachine::new();
        machine.apply(SessionEvent::ScanFailed("kamera mati".into()), now());
        assert_eq!(machine.state(), CaptureState::Scanning);
        assert_eq!(machine.error(), Some("kamera mati"));
    }

    #[test]
    fn test_location_populates_once_in_any_state() {
        let mut machine = scanned_machine();
        machine.apply(
            SessionEvent::LocationResolved(Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            }),
            now(),
        );
        machine.apply(SessionEvent::LocationResolved(Coordinates::FALLBACK), now());
        let location = machine.location().unwrap();
        assert_eq!(location.latitude, 1.0);
        assert_eq!(machine.state(), CaptureState::Confirming);
    }

    #[test]
    fn test_submit_without_location_is_a_no_op() {
        let mut machine = scanned_machine();
        let effect = machine.apply(SessionEvent::Submit, now());
        assert!(effect.is_none());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert_eq!(machine.error(), Some(messages::NO_LOCATION));
        assert_eq!(machine.pending().unwrap().name, "Ahmad Rizki");
    }

    #[test]
    fn test_submit_without_identity_is_blocked() {
        let mut machine = CaptureMachine::new();
        machine.apply(SessionEvent::LocationResolved(Coordinates::FALLBACK), now());
        let effect = machine.apply(SessionEvent::Submit, now());
        assert!(effect.is_none());
        assert_eq!(machine.state(), CaptureState::Scanning);
        assert_eq!(machine.error(), Some(messages::NO_IDENTITY));
    }

    #[test]
    fn test_status_selection_keeps_state() {
        let mut machine = scanned_machine();
        machine.apply(SessionEvent::StatusSelected(AttendanceStatus::Sakit), now());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert_eq!(machine.status(), AttendanceStatus::Sakit);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut machine = scanned_machine();
        machine.apply(SessionEvent::StatusSelected(AttendanceStatus::Izin), now());
        machine.apply(SessionEvent::Cancel, now());
        assert_eq!(machine.state(), CaptureState::Scanning);
        assert!(machine.pending().is_none());
        assert_eq!(machine.status(), AttendanceStatus::Hadir);
        assert!(machine.error().is_none());
    }

    #[test]
    fn test_submit_composes_draft_from_submission_instant() {
        let mut machine = scanned_machine();
        machine.apply(SessionEvent::LocationResolved(Coordinates::FALLBACK), now());
        machine.apply(SessionEvent::StatusSelected(AttendanceStatus::Izin), now());

        let submitted_at = NaiveDate::from_ymd_opt(2024, 3, 12)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        let effect = machine.apply(SessionEvent::Submit, submitted_at);
        let Some(Effect::BeginWrite(draft)) = effect else {
            panic!("expected BeginWrite, got {effect:?}");
        };
        assert_eq!(machine.state(), CaptureState::Submitting);
        assert_eq!(draft.status, AttendanceStatus::Izin);
        assert_eq!(draft.gender, Gender::Putra);
        assert_eq!(draft.date, submitted_at.date());
        assert_eq!(draft.time, submitted_at.time());
        assert_eq!(draft.location, Coordinates::FALLBACK);
    }

    fn submitted_machine() -> (CaptureMachine, RecordDraft) {
        let mut machine = scanned_machine();
        machine.apply(SessionEvent::LocationResolved(Coordinates::FALLBACK), now());
        machine.apply(SessionEvent::StatusSelected(AttendanceStatus::Izin), now());
        let Some(Effect::BeginWrite(draft)) = machine.apply(SessionEvent::Submit, now()) else {
            panic!("submit was not accepted");
        };
        (machine, draft)
    }

    #[test]
    fn test_write_accepted_schedules_reset() {
        let (mut machine, draft) = submitted_machine();
        let record = AttendanceRecord::from_draft("r1".into(), &draft);
        let effect = machine.apply(SessionEvent::WriteAccepted(record), now());
        assert_eq!(effect, Some(Effect::ScheduleReset));
        assert_eq!(machine.state(), CaptureState::Succeeded);
        assert_eq!(machine.last_stored().unwrap().status, AttendanceStatus::Izin);
    }

    #[test]
    fn test_write_rejected_returns_to_confirming_with_state_kept() {
        let (mut machine, _) = submitted_machine();
        machine.apply(SessionEvent::WriteRejected("gateway 500".into()), now());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert_eq!(machine.error(), Some(messages::WRITE_FAILED));
        assert_eq!(machine.pending().unwrap().name, "Ahmad Rizki");
        assert_eq!(machine.status(), AttendanceStatus::Izin);

        // Retry without re-scanning produces an equivalent draft.
        let Some(Effect::BeginWrite(retry)) = machine.apply(SessionEvent::Submit, now()) else {
            panic!("retry submit was not accepted");
        };
        assert_eq!(retry.name, "Ahmad Rizki");
        assert_eq!(retry.status, AttendanceStatus::Izin);
    }

    #[test]
    fn test_reset_clears_everything_for_any_prior_combination() {
        for status in AttendanceStatus::ALL {
            let mut machine = scanned_machine();
            machine.apply(SessionEvent::LocationResolved(Coordinates::FALLBACK), now());
            machine.apply(SessionEvent::StatusSelected(status), now());
            let Some(Effect::BeginWrite(draft)) = machine.apply(SessionEvent::Submit, now())
            else {
                panic!("submit was not accepted");
            };
            let record = AttendanceRecord::from_draft("r1".into(), &draft);
            machine.apply(SessionEvent::WriteAccepted(record), now());
            machine.apply(SessionEvent::ResetElapsed, now());

            assert_eq!(machine.state(), CaptureState::Scanning);
            assert!(machine.pending().is_none());
            assert_eq!(machine.status(), AttendanceStatus::Hadir);
            assert!(machine.error().is_none());
            assert!(machine.last_stored().is_none());
            // The session keeps its coordinates; only the cycle state resets.
            assert!(machine.location().is_some());
        }
    }

    #[test]
    fn test_success_window_blocks_input() {
        let (mut machine, draft) = submitted_machine();
        let record = AttendanceRecord::from_draft("r1".into(), &draft);
        machine.apply(SessionEvent::WriteAccepted(record), now());

        machine.apply(SessionEvent::ScanDecoded(PAYLOAD.into()), now());
        machine.apply(SessionEvent::Cancel, now());
        machine.apply(SessionEvent::Submit, now());
        assert_eq!(machine.state(), CaptureState::Succeeded);
        assert!(machine.last_stored().is_some());
    }

    #[test]
    fn test_stale_write_results_are_ignored() {
        let mut machine = scanned_machine();
        let record = AttendanceRecord::from_draft(
            "r1".into(),
            &RecordDraft::compose(
                machine.pending().unwrap(),
                AttendanceStatus::Hadir,
                Coordinates::FALLBACK,
                now(),
            ),
        );
        machine.apply(SessionEvent::WriteAccepted(record), now());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert!(machine.last_stored().is_none());

        machine.apply(SessionEvent::WriteRejected("late".into()), now());
        assert_eq!(machine.state(), CaptureState::Confirming);
        assert!(machine.error().is_none());
    }

    #[test]
    fn test_duplicate_submit_while_in_flight_is_ignored() {
        let (mut machine, _) = submitted_machine();
        let effect = machine.apply(SessionEvent::Submit, now());
        assert!(effect.is_none());
        assert_eq!(machine.state(), CaptureState::Submitting);
    }
}

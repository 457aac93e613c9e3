use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::Local;

use absensi_core::model::Coordinates;
use absensi_core::storage::AttendanceStore;

use crate::adapters::{LocationProvider, TokenDecoder};
use crate::machine::{CaptureMachine, CaptureState, Effect, SessionEvent};

/// Tunables for one capture session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the success display stays up before the automatic return to
    /// scanning.
    pub reset_delay: Duration,
    /// Coordinates recorded when the location provider denies or fails.
    pub fallback_location: Coordinates,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(3000),
            fallback_location: Coordinates::FALLBACK,
        }
    }
}

/// A cancellable handle on the success-window auto-reset. Cancelled on
/// session teardown so the timer never fires into a disposed session.
struct ResetTimer {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ResetTimer {
    const TICK: Duration = Duration::from_millis(25);

    fn arm(delay: Duration, events: Sender<SessionEvent>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = thread::spawn(move || {
            let mut remaining = delay;
            while !remaining.is_zero() {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                let step = remaining.min(Self::TICK);
                thread::sleep(step);
                remaining = remaining.saturating_sub(step);
            }
            if !flag.load(Ordering::Relaxed) {
                let _ = events.send(SessionEvent::ResetElapsed);
            }
        });
        Self {
            cancelled,
            handle: Some(handle),
        }
    }

    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One capture session: the event channel, the reducer, the store and the
/// reset timer, driven from a single logical thread of control. Adapters
/// post events from their own threads; this runtime is the only consumer,
/// so the location result may land before, during or after any scan.
pub struct CaptureSession<S: AttendanceStore> {
    machine: CaptureMachine,
    store: S,
    config: SessionConfig,
    events: Sender<SessionEvent>,
    inbox: Receiver<SessionEvent>,
    timer: Option<ResetTimer>,
}

impl<S: AttendanceStore> CaptureSession<S> {
    /// Start a session. Location acquisition begins immediately, concurrent
    /// with scanning, and resolves exactly once per session: a real reading,
    /// or the fallback on denial/failure.
    pub fn start<L>(store: S, provider: L, config: SessionConfig) -> Self
    where
        L: LocationProvider + Send + 'static,
    {
        let (events, inbox) = mpsc::channel();

        // The provider thread posts once and exits; a send after teardown
        // just fails.
        let tx = events.clone();
        let fallback = config.fallback_location;
        thread::spawn(move || {
            let coords = match provider.locate() {
                Ok(coords) => coords,
                Err(reason) => {
                    tracing::debug!("Location provider refused ({reason}); using fallback");
                    fallback
                }
            };
            let _ = tx.send(SessionEvent::LocationResolved(coords));
        });

        Self {
            machine: CaptureMachine::new(),
            store,
            config,
            events,
            inbox,
            timer: None,
        }
    }

    /// A sender for adapters that post scan outcomes into this session.
    pub fn event_sender(&self) -> Sender<SessionEvent> {
        self.events.clone()
    }

    pub fn machine(&self) -> &CaptureMachine {
        &self.machine
    }

    /// Feed one operator or adapter event through the reducer. Events that
    /// arrived earlier on the channel are applied first, in arrival order.
    pub fn handle(&mut self, event: SessionEvent) {
        self.pump();
        self.dispatch(event);
    }

    /// Pull the next outcome from a decoder and feed it in. Returns `false`
    /// once the decoder is exhausted.
    pub fn scan_from<D: TokenDecoder>(&mut self, decoder: &mut D) -> bool {
        match decoder.next_scan() {
            Some(Ok(raw)) => {
                self.handle(SessionEvent::ScanDecoded(raw));
                true
            }
            Some(Err(message)) => {
                self.handle(SessionEvent::ScanFailed(message));
                true
            }
            None => false,
        }
    }

    /// Drain adapter events that have already arrived.
    pub fn pump(&mut self) {
        while let Ok(event) = self.inbox.try_recv() {
            self.dispatch(event);
        }
    }

    /// Block until one event arrives (or `timeout` passes), then drain the
    /// rest.
    pub fn pump_wait(&mut self, timeout: Duration) {
        if let Ok(event) = self.inbox.recv_timeout(timeout) {
            self.dispatch(event);
        }
        self.pump();
    }

    /// Wait until the location result has been applied, up to `deadline`.
    pub fn wait_for_location(&mut self, deadline: Duration) -> bool {
        let started = Instant::now();
        while self.machine.location().is_none() {
            if started.elapsed() >= deadline {
                return false;
            }
            self.pump_wait(Duration::from_millis(25));
        }
        true
    }

    /// Wait out the success display window; returns `true` once the machine
    /// is back in `Scanning`.
    pub fn wait_for_reset(&mut self, deadline: Duration) -> bool {
        let started = Instant::now();
        while self.machine.state() != CaptureState::Scanning {
            if started.elapsed() >= deadline {
                return false;
            }
            self.pump_wait(Duration::from_millis(25));
        }
        true
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let now = Local::now().naive_local();
        match self.machine.apply(event, now) {
            Some(Effect::BeginWrite(draft)) => {
                // A single request, no client-side retry; a retry is the
                // operator re-submitting from Confirming.
                let outcome = match self.store.append(&draft) {
                    Ok(record) => SessionEvent::WriteAccepted(record),
                    Err(e) => SessionEvent::WriteRejected(e.to_string()),
                };
                self.dispatch(outcome);
            }
            Some(Effect::ScheduleReset) => {
                self.timer = Some(ResetTimer::arm(
                    self.config.reset_delay,
                    self.events.clone(),
                ));
            }
            None => {}
        }
    }
}

impl<S: AttendanceStore> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
    }
}

//! Recompilation scheduler.
//!
//! Pure timing state machine: no clock reads, no tasks. Callers pass `now`
//! and ask `poll` whether a pass is due; the actor loop sleeps until
//! `deadline()`.
//!
//! ```text
//!            content-changed
//!   ┌──────┐ ─────────────────────▶ ┌───────────────────┐ ◀─┐ content-changed,
//!   │ Idle │                        │ Pending(deadline) │ ──┘ cursor before deadline
//!   └──────┘ ◀───────────────────── └───────────────────┘
//!             poll(now >= deadline)
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Editor activity that feeds the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    ContentChanged,
    CursorMoved,
    /// Handled exactly like `CursorMoved`.
    SelectionChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending(Instant),
}

/// Debounces bursts of edits into one compilation pass.
///
/// Holds at most one deadline. Content changes always (re-)arm a full
/// window; cursor and selection activity only extends a window that is
/// still open.
#[derive(Debug, Clone)]
pub struct Scheduler {
    quiescence: Duration,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Idle => None,
            SchedulerState::Pending(deadline) => Some(deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SchedulerState::Pending(_))
    }

    /// Record activity at `now`.
    pub fn record(&mut self, activity: Activity, now: Instant) {
        match activity {
            Activity::ContentChanged => self.content_changed(now),
            Activity::CursorMoved | Activity::SelectionChanged => self.cursor_moved(now),
        }
    }

    /// Cancel any pending window and arm a new one.
    pub fn content_changed(&mut self, now: Instant) {
        self.arm(now);
    }

    /// Extend a pending window that has not elapsed yet. A move at or after
    /// the deadline is too late: the elapsed window still fires.
    pub fn cursor_moved(&mut self, now: Instant) {
        if let SchedulerState::Pending(deadline) = self.state
            && now < deadline
        {
            self.arm(now);
        }
    }

    /// Whether a pass is due at `now`. Returns `true` once per window and
    /// goes back to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Pending(deadline) if now >= deadline => {
                self.state = SchedulerState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending window without firing it.
    pub fn cancel(&mut self) {
        self.state = SchedulerState::Idle;
    }

    fn arm(&mut self, now: Instant) {
        let deadline = now + self.quiescence;
        crate::debug!("scheduler"; "armed for {:?}", self.quiescence);
        self.state = SchedulerState::Pending(deadline);
    }
}

//! Session state machine.
//!
//! `SchedulerCore` holds everything the scheduler mutates: the active
//! countdown, the durations, the progress counters and the epoch marker.
//! It has no clock and no I/O; the engine drives it one tick at a time.
//!
//! ```text
//!           start              pause
//!   Idle ──────────▶ Running ─────────▶ Paused
//!    ▲                │  ▲   ◀───────── │
//!    │      reset     │  │     resume   │
//!    └────────────────┴──┼──────────────┘
//!                        │ tick → 0: next session
//!                        └──────┘
//! ```

use tracing::warn;

use super::error::SchedulerError;
use crate::types::{
    CycleCounters, DurationField, Durations, DurationsUpdate, SchedulerConfig, SessionKind,
    Snapshot, TimerState,
};

// ============================================================================
// Countdown
// ============================================================================

/// The active countdown, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Idle,
    Running {
        kind: SessionKind,
        remaining_seconds: u32,
    },
    Paused {
        kind: SessionKind,
        remaining_seconds: u32,
    },
}

impl Countdown {
    /// Returns the coarse timer state.
    pub fn state(&self) -> TimerState {
        match self {
            Countdown::Idle => TimerState::Idle,
            Countdown::Running { .. } => TimerState::Running,
            Countdown::Paused { .. } => TimerState::Paused,
        }
    }

    /// Returns the active session kind.
    pub fn session(&self) -> Option<SessionKind> {
        match self {
            Countdown::Idle => None,
            Countdown::Running { kind, .. } | Countdown::Paused { kind, .. } => Some(*kind),
        }
    }

    /// Returns the remaining seconds (0 when idle).
    pub fn remaining_seconds(&self) -> u32 {
        match self {
            Countdown::Idle => 0,
            Countdown::Running {
                remaining_seconds, ..
            }
            | Countdown::Paused {
                remaining_seconds, ..
            } => *remaining_seconds,
        }
    }
}

// ============================================================================
// TickOutcome
// ============================================================================

/// A session that ran to zero, and what follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompletion {
    /// Kind of the session that just completed
    pub completed: SessionKind,
    /// Kind of the session that starts now
    pub next: SessionKind,
    /// Full duration of the next session
    pub next_duration_seconds: u32,
    /// Counters after recording the completion
    pub counters: CycleCounters,
}

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belongs to a cancelled run; nothing changed.
    Stale,
    /// Not counting down (paused); nothing changed.
    Suspended,
    /// One second elapsed.
    Counting {
        kind: SessionKind,
        remaining_seconds: u32,
    },
    /// The session reached zero and the next one started.
    Completed(SessionCompletion),
}

// ============================================================================
// SchedulerCore
// ============================================================================

/// Session state machine and counters.
#[derive(Debug, Clone)]
pub struct SchedulerCore {
    countdown: Countdown,
    durations: Durations,
    cycles_before_long_break: u32,
    counters: CycleCounters,
    epoch: u64,
}

impl SchedulerCore {
    /// Creates an idle core with the given configuration and restored counters.
    pub fn new(config: SchedulerConfig, counters: CycleCounters) -> Self {
        Self {
            countdown: Countdown::Idle,
            durations: config.durations,
            cycles_before_long_break: config.cycles_before_long_break.max(1),
            counters,
            epoch: 0,
        }
    }

    /// Starts the first work session.
    ///
    /// Returns the epoch of the new run.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRunning` if a countdown is active.
    pub fn start(&mut self) -> Result<u64, SchedulerError> {
        if self.countdown != Countdown::Idle {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.epoch += 1;
        self.countdown = Countdown::Running {
            kind: SessionKind::Work,
            remaining_seconds: self.durations.work_seconds,
        };
        Ok(self.epoch)
    }

    /// Freezes the running countdown.
    ///
    /// Returns the frozen remaining seconds.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` unless the countdown is running.
    pub fn pause(&mut self) -> Result<u32, SchedulerError> {
        match self.countdown {
            Countdown::Running {
                kind,
                remaining_seconds,
            } => {
                self.countdown = Countdown::Paused {
                    kind,
                    remaining_seconds,
                };
                Ok(remaining_seconds)
            }
            _ => Err(SchedulerError::NotRunning),
        }
    }

    /// Continues a paused countdown from its frozen value.
    ///
    /// # Errors
    ///
    /// Returns `NotPaused` unless the countdown is paused.
    pub fn resume(&mut self) -> Result<u32, SchedulerError> {
        match self.countdown {
            Countdown::Paused {
                kind,
                remaining_seconds,
            } => {
                self.countdown = Countdown::Running {
                    kind,
                    remaining_seconds,
                };
                Ok(remaining_seconds)
            }
            _ => Err(SchedulerError::NotPaused),
        }
    }

    /// Cancels any countdown and clears the counters.
    ///
    /// The in-progress session earns no credit.
    pub fn reset(&mut self) {
        self.cancel();
        self.counters = CycleCounters::default();
    }

    /// Cancels any countdown, keeping the counters.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.countdown = Countdown::Idle;
    }

    /// Advances the countdown of run `epoch` by one second.
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch {
            return TickOutcome::Stale;
        }

        let (kind, remaining_seconds) = match self.countdown {
            Countdown::Running {
                kind,
                remaining_seconds,
            } => (kind, remaining_seconds.saturating_sub(1)),
            Countdown::Idle | Countdown::Paused { .. } => return TickOutcome::Suspended,
        };

        if remaining_seconds > 0 {
            self.countdown = Countdown::Running {
                kind,
                remaining_seconds,
            };
            return TickOutcome::Counting {
                kind,
                remaining_seconds,
            };
        }

        self.counters.record_completion(kind);
        let next = self.next_session(kind);
        let next_duration_seconds = self.durations.for_session(next);
        self.countdown = Countdown::Running {
            kind: next,
            remaining_seconds: next_duration_seconds,
        };

        TickOutcome::Completed(SessionCompletion {
            completed: kind,
            next,
            next_duration_seconds,
            counters: self.counters,
        })
    }

    /// Chooses the session that follows a completed one.
    ///
    /// The long break is keyed on completed work sessions, not on
    /// `cycles_completed`. Cycles also count breaks, so after a work session
    /// they are always odd from a fresh start and a cycle-based rule would
    /// never pick a long break. With restored counters the two rules can
    /// disagree: from `(5, 3)` the next work completion gives `(6, 4)` and a
    /// short break here, where a cycle-based rule would pick a long one.
    ///
    /// Must be called after the completion has been recorded.
    fn next_session(&self, completed: SessionKind) -> SessionKind {
        if completed.is_break() {
            return SessionKind::Work;
        }
        if self.counters.work_sessions_completed % self.cycles_before_long_break == 0 {
            SessionKind::LongBreak
        } else {
            SessionKind::ShortBreak
        }
    }

    /// Applies a duration update field by field.
    ///
    /// Valid fields are applied even when others are rejected. Returns the
    /// rejections; an empty vector means every provided field was applied.
    pub fn set_durations(&mut self, update: &DurationsUpdate) -> Vec<SchedulerError> {
        let mut rejected = Vec::new();

        for (field, value) in update.fields() {
            match validate_duration(field, value) {
                Ok(seconds) => self.durations.set(field, seconds),
                Err(e) => {
                    warn!("Rejected {:?} duration {}: {}", field, value, e);
                    rejected.push(e);
                }
            }
        }

        rejected
    }

    /// Returns a read-only view for display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.countdown.state(),
            session: self.countdown.session(),
            remaining_seconds: self.countdown.remaining_seconds(),
            counters: self.counters,
            durations: self.durations,
        }
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn counters(&self) -> CycleCounters {
        self.counters
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Checks a requested duration and converts it to seconds.
fn validate_duration(field: DurationField, value: i64) -> Result<u32, SchedulerError> {
    if value <= 0 {
        return Err(SchedulerError::invalid_duration(
            field,
            format!("{}秒は正の値ではありません", value),
        ));
    }
    u32::try_from(value).map_err(|_| {
        SchedulerError::invalid_duration(field, format!("{}秒は大きすぎます", value))
    })
}

// ============================================================================
// Tests
// ============================================================================

//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Session kinds and the coarse timer state
//! - Session durations and scheduler configuration with validation
//! - Progress counters (the only persisted state)
//! - Read-only snapshots for display

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default work duration in seconds (25 minutes).
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;

/// Default short break duration in seconds (5 minutes).
pub const DEFAULT_SHORT_BREAK_SECONDS: u32 = 5 * 60;

/// Default long break duration in seconds (15 minutes).
pub const DEFAULT_LONG_BREAK_SECONDS: u32 = 15 * 60;

/// Number of work sessions before a long break.
pub const CYCLES_BEFORE_LONG_BREAK: u32 = 4;

// ============================================================================
// SessionKind
// ============================================================================

/// The kind of a timed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Focused work interval
    Work,
    /// Short rest interval
    ShortBreak,
    /// Long rest interval (after several work sessions)
    LongBreak,
}

impl SessionKind {
    /// Returns the string representation of the session kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::ShortBreak => "short_break",
            SessionKind::LongBreak => "long_break",
        }
    }

    /// Returns the human-readable label of the session kind.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "作業",
            SessionKind::ShortBreak => "短い休憩",
            SessionKind::LongBreak => "長い休憩",
        }
    }

    /// Returns true if this is a break (short or long).
    pub fn is_break(&self) -> bool {
        matches!(self, SessionKind::ShortBreak | SessionKind::LongBreak)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Coarse state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// No active countdown
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Suspended mid-session, remaining time frozen
    Paused,
}

impl TimerState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
        }
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Identifies one of the three configurable durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationField {
    Work,
    ShortBreak,
    LongBreak,
}

impl DurationField {
    /// All fields, in prompt order.
    pub const ALL: [DurationField; 3] = [
        DurationField::Work,
        DurationField::ShortBreak,
        DurationField::LongBreak,
    ];

    /// Returns the human-readable label of the field.
    pub fn label(&self) -> &'static str {
        match self {
            DurationField::Work => "作業時間",
            DurationField::ShortBreak => "短い休憩時間",
            DurationField::LongBreak => "長い休憩時間",
        }
    }
}

impl std::fmt::Display for DurationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Session durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    /// Work duration in seconds
    pub work_seconds: u32,
    /// Short break duration in seconds
    pub short_break_seconds: u32,
    /// Long break duration in seconds
    pub long_break_seconds: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            short_break_seconds: DEFAULT_SHORT_BREAK_SECONDS,
            long_break_seconds: DEFAULT_LONG_BREAK_SECONDS,
        }
    }
}

impl Durations {
    /// Creates durations from explicit second values.
    pub fn new(work_seconds: u32, short_break_seconds: u32, long_break_seconds: u32) -> Self {
        Self {
            work_seconds,
            short_break_seconds,
            long_break_seconds,
        }
    }

    /// Returns the full duration of a session of the given kind.
    pub fn for_session(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_seconds,
            SessionKind::ShortBreak => self.short_break_seconds,
            SessionKind::LongBreak => self.long_break_seconds,
        }
    }

    /// Returns the value of a single field.
    pub fn get(&self, field: DurationField) -> u32 {
        match field {
            DurationField::Work => self.work_seconds,
            DurationField::ShortBreak => self.short_break_seconds,
            DurationField::LongBreak => self.long_break_seconds,
        }
    }

    /// Overwrites a single field.
    pub fn set(&mut self, field: DurationField, seconds: u32) {
        match field {
            DurationField::Work => self.work_seconds = seconds,
            DurationField::ShortBreak => self.short_break_seconds = seconds,
            DurationField::LongBreak => self.long_break_seconds = seconds,
        }
    }
}

/// A partial duration update, as entered by the user.
///
/// Values are signed so that non-positive input reaches the scheduler and is
/// rejected there, per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationsUpdate {
    pub work: Option<i64>,
    pub short_break: Option<i64>,
    pub long_break: Option<i64>,
}

impl DurationsUpdate {
    /// Sets the work duration in seconds.
    pub fn with_work(mut self, seconds: i64) -> Self {
        self.work = Some(seconds);
        self
    }

    /// Sets the short break duration in seconds.
    pub fn with_short_break(mut self, seconds: i64) -> Self {
        self.short_break = Some(seconds);
        self
    }

    /// Sets the long break duration in seconds.
    pub fn with_long_break(mut self, seconds: i64) -> Self {
        self.long_break = Some(seconds);
        self
    }

    /// Sets the value for a field.
    pub fn set(&mut self, field: DurationField, seconds: i64) {
        match field {
            DurationField::Work => self.work = Some(seconds),
            DurationField::ShortBreak => self.short_break = Some(seconds),
            DurationField::LongBreak => self.long_break = Some(seconds),
        }
    }

    /// Iterates over the provided fields.
    pub fn fields(&self) -> impl Iterator<Item = (DurationField, i64)> + '_ {
        DurationField::ALL.into_iter().filter_map(move |field| {
            let value = match field {
                DurationField::Work => self.work,
                DurationField::ShortBreak => self.short_break,
                DurationField::LongBreak => self.long_break,
            };
            value.map(|v| (field, v))
        })
    }
}

// ============================================================================
// SchedulerConfig
// ============================================================================

/// Configuration for the session scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Initial session durations
    pub durations: Durations,
    /// Work sessions before a long break
    pub cycles_before_long_break: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            cycles_before_long_break: CYCLES_BEFORE_LONG_BREAK,
        }
    }
}

impl SchedulerConfig {
    /// Creates a new configuration with the specified durations.
    pub fn with_durations(mut self, durations: Durations) -> Self {
        self.durations = durations;
        self
    }

    /// Creates a new configuration with the specified long break interval.
    pub fn with_cycles_before_long_break(mut self, cycles: u32) -> Self {
        self.cycles_before_long_break = cycles;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        for field in DurationField::ALL {
            if self.durations.get(field) == 0 {
                return Err(format!("{}は1秒以上で指定してください", field.label()));
            }
        }
        if self.cycles_before_long_break == 0 {
            return Err("長い休憩までのサイクル数は1以上で指定してください".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// CycleCounters
// ============================================================================

/// Progress counters. These are the only values written to durable storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCounters {
    /// Number of completed work sessions
    pub work_sessions_completed: u32,
    /// Number of completed sessions of any kind
    pub cycles_completed: u32,
}

impl CycleCounters {
    /// Creates counters with the given values.
    pub fn new(work_sessions_completed: u32, cycles_completed: u32) -> Self {
        Self {
            work_sessions_completed,
            cycles_completed,
        }
    }

    /// Records a completed session.
    pub fn record_completion(&mut self, kind: SessionKind) {
        if kind == SessionKind::Work {
            self.work_sessions_completed = self.work_sessions_completed.saturating_add(1);
        }
        self.cycles_completed = self.cycles_completed.saturating_add(1);
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Read-only view of the scheduler for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Coarse timer state
    pub state: TimerState,
    /// Kind of the active session (None when idle)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionKind>,
    /// Remaining seconds in the active session (0 when idle)
    pub remaining_seconds: u32,
    /// Progress counters
    pub counters: CycleCounters,
    /// Durations that apply from the next session boundary
    pub durations: Durations,
}

// ============================================================================
// Tests
// ============================================================================

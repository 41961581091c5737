//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the interactive
//! Pomodoro timer. It includes:
//! - Session scheduler with a background countdown
//! - Progress persistence across restarts
//! - Completion alerts
//! - CLI command parsing, the interactive loop and display utilities
//! - Type definitions for configuration and state

pub mod cli;
pub mod notification;
pub mod scheduler;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    CycleCounters, DurationField, Durations, DurationsUpdate, SchedulerConfig, SessionKind,
    Snapshot, TimerState,
};

pub use scheduler::{Scheduler, SchedulerError, TimerEvent};

pub use store::{
    default_progress_path, FileProgressStore, MemoryProgressStore, ProgressStore, StoreError,
};

pub use notification::{
    MockNotifier, NotificationError, SessionNotifier, SilentNotifier, TerminalBell,
};

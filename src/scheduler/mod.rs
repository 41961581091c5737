//! Session scheduler for the Pomodoro Timer.
//!
//! This module contains the timer core:
//! - `state`: the session state machine and cycle sequencing
//! - `engine`: the shared scheduler handle and its background countdown
//! - `error`: errors returned by scheduler commands

mod engine;
mod error;
mod state;

pub use engine::{Scheduler, TimerEvent, TICK_INTERVAL};
pub use error::SchedulerError;
pub use state::{Countdown, SchedulerCore, SessionCompletion, TickOutcome};

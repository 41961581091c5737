//! Interactive command loop.
//!
//! The foreground control path: reads menu commands line by line and
//! invokes scheduler commands. It never touches scheduler state directly.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::commands::MenuCommand;
use super::display::Display;
use super::duration::parse_duration_input;
use crate::scheduler::{Scheduler, SchedulerError};
use crate::types::{DurationField, DurationsUpdate};

/// Why the command loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user chose quit.
    Quit,
    /// Input ended (EOF or closed line source).
    EndOfInput,
}

/// Spawns a thread that forwards stdin lines into a channel.
///
/// The thread is not owned by the runtime. The channel closes at EOF.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        debug!("Input reader finished");
    });

    rx
}

/// Reads menu commands and dispatches them to the scheduler.
pub struct CommandLoop {
    lines: mpsc::UnboundedReceiver<String>,
    scheduler: Scheduler,
}

impl CommandLoop {
    /// Creates a command loop over a line source.
    pub fn new(lines: mpsc::UnboundedReceiver<String>, scheduler: Scheduler) -> Self {
        Self { lines, scheduler }
    }

    /// Runs until the user quits or input ends.
    ///
    /// Recoverable errors are reported and the loop continues.
    pub async fn run(&mut self) -> LoopExit {
        Display::show_welcome();

        loop {
            Display::show_menu();

            let Some(line) = self.lines.recv().await else {
                return LoopExit::EndOfInput;
            };
            if line.trim().is_empty() {
                continue;
            }

            match MenuCommand::parse(&line) {
                Ok(MenuCommand::Quit) => return LoopExit::Quit,
                Ok(command) => self.dispatch(command).await,
                Err(e) => Display::show_error(&e.to_string()),
            }
        }
    }

    async fn dispatch(&mut self, command: MenuCommand) {
        debug!(?command, "Dispatching command");

        match command {
            MenuCommand::Start => match self.scheduler.start() {
                Ok(()) => Display::show_start_success(),
                Err(e) => Display::show_error(&e.to_string()),
            },
            MenuCommand::Pause => match self.scheduler.pause() {
                Ok(remaining) => Display::show_pause_success(remaining),
                Err(e) => Display::show_error(&e.to_string()),
            },
            MenuCommand::Resume => match self.scheduler.resume() {
                Ok(remaining) => Display::show_resume_success(remaining),
                Err(e) => Display::show_error(&e.to_string()),
            },
            MenuCommand::Reset => {
                self.scheduler.reset();
                Display::show_reset_success();
            }
            MenuCommand::SetDurations => self.set_durations().await,
            MenuCommand::ViewProgress => Display::show_progress(&self.scheduler.snapshot()),
            // The menu is shown before every prompt.
            MenuCommand::Help | MenuCommand::Quit => {}
        }
    }

    /// Prompts for the three durations and applies them.
    async fn set_durations(&mut self) {
        let current = self.scheduler.snapshot().durations;
        let mut update = DurationsUpdate::default();
        let mut rejected: Vec<SchedulerError> = Vec::new();

        for field in DurationField::ALL {
            Display::prompt_duration(field.label(), current.get(field));

            let Some(line) = self.lines.recv().await else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_duration_input(line) {
                Ok(seconds) => update.set(field, seconds),
                Err(reason) => rejected.push(SchedulerError::invalid_duration(field, reason)),
            }
        }

        let refused = self.scheduler.set_durations(&update);
        let applied = update.fields().count() > refused.len();
        rejected.extend(refused);

        for e in &rejected {
            Display::show_warning(&e.to_string());
        }
        if applied {
            Display::show_durations(&self.scheduler.snapshot().durations);
        }
    }
}

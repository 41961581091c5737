//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing, plus the menu commands
//! accepted by the interactive loop.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use super::duration::parse_duration_arg;
use crate::types::{Durations, SchedulerConfig, CYCLES_BEFORE_LONG_BREAK};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - an interactive terminal productivity tool
#[derive(Parser, Debug)]
#[command(
    name = "pomocycle",
    version,
    about = "対話型ポモドーロタイマー",
    long_about = "作業と休憩を交互に計測する対話型ポモドーロタイマー。\n\
                  完了したセッション数はファイルに保存され、次回起動時に復元されます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path of the progress file
    #[arg(long, global = true, value_name = "PATH")]
    pub progress_file: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer (default)
    Run(RunArgs),

    /// Show saved progress and exit
    Progress {
        /// Print progress as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work duration (e.g. 25, 25m, 90s, 1m30s; bare numbers are minutes)
    #[arg(short, long, default_value = "25m", value_parser = parse_duration_arg)]
    pub work: u32,

    /// Short break duration
    #[arg(short, long, default_value = "5m", value_parser = parse_duration_arg)]
    pub short_break: u32,

    /// Long break duration
    #[arg(short, long, default_value = "15m", value_parser = parse_duration_arg)]
    pub long_break: u32,

    /// Work sessions before a long break
    #[arg(
        long,
        default_value_t = CYCLES_BEFORE_LONG_BREAK,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub long_break_every: u32,

    /// Disable the completion bell
    #[arg(long)]
    pub no_sound: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        let durations = Durations::default();
        Self {
            work: durations.work_seconds,
            short_break: durations.short_break_seconds,
            long_break: durations.long_break_seconds,
            long_break_every: CYCLES_BEFORE_LONG_BREAK,
            no_sound: false,
        }
    }
}

impl RunArgs {
    /// Builds the scheduler configuration from the arguments.
    pub fn config(&self) -> SchedulerConfig {
        SchedulerConfig::default()
            .with_durations(Durations::new(self.work, self.short_break, self.long_break))
            .with_cycles_before_long_break(self.long_break_every)
    }
}

// ============================================================================
// Menu Commands
// ============================================================================

/// Error for unrecognized menu input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The input matches no menu command.
    #[error("無効なコマンドです: '{0}'（h でメニューを表示）")]
    InvalidCommand(String),
}

/// Commands accepted by the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start,
    Pause,
    Resume,
    Reset,
    SetDurations,
    ViewProgress,
    Help,
    Quit,
}

impl MenuCommand {
    /// Parses one line of menu input (trimmed, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `CommandError::InvalidCommand` for unrecognized input.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "s" | "start" => Ok(Self::Start),
            "p" | "pause" => Ok(Self::Pause),
            "r" | "resume" => Ok(Self::Resume),
            "c" | "reset" => Ok(Self::Reset),
            "set" => Ok(Self::SetDurations),
            "v" | "view" | "progress" => Ok(Self::ViewProgress),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::InvalidCommand(input.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive, plus menu commands
//! - `duration`: Duration input parsing (`25`, `90s`, `1m30s`)
//! - `repl`: The interactive command loop
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod duration;
pub mod repl;

pub use commands::{Cli, CommandError, Commands, MenuCommand, RunArgs};
pub use display::{forward_events, print_events, Display};
pub use duration::{parse_duration_arg, parse_duration_input};
pub use repl::{spawn_stdin_reader, CommandLoop, LoopExit};

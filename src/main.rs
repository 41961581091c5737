//! Pomodoro Timer CLI - an interactive terminal productivity tool
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::{mpsc, oneshot};

use pomocycle::cli::{
    print_events, spawn_stdin_reader, Cli, CommandLoop, Commands, Display, LoopExit, RunArgs,
};
use pomocycle::notification::{SessionNotifier, SilentNotifier, TerminalBell};
use pomocycle::scheduler::Scheduler;
use pomocycle::store::{default_progress_path, FileProgressStore, ProgressStore};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `--verbose`. Logs go to stderr.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let progress_path = resolve_progress_path(cli.progress_file);
    tracing::debug!(path = %progress_path.display(), "Using progress file");

    match cli.command {
        Some(Commands::Run(args)) => run_interactive(&args, progress_path).await?,
        None => run_interactive(&RunArgs::default(), progress_path).await?,
        Some(Commands::Progress { json }) => {
            let counters = FileProgressStore::new(progress_path).try_load()?;
            if json {
                Display::show_counters_json(&counters)?;
            } else {
                Display::show_counters(&counters);
            }
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn resolve_progress_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(default_progress_path)
}

/// Runs the interactive timer until the user quits.
async fn run_interactive(args: &RunArgs, progress_path: PathBuf) -> Result<()> {
    let config = args.config();
    config.validate().map_err(|e| anyhow!(e))?;

    let store: Arc<dyn ProgressStore> = Arc::new(FileProgressStore::new(progress_path));
    let notifier: Arc<dyn SessionNotifier> = if args.no_sound {
        Arc::new(SilentNotifier)
    } else {
        Arc::new(TerminalBell::stdout())
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let scheduler = Scheduler::new(config, store, notifier, event_tx);
    let (stop_tx, stop_rx) = oneshot::channel();
    let printer = tokio::spawn(print_events(event_rx, stop_rx));

    let mut command_loop = CommandLoop::new(spawn_stdin_reader(), scheduler.clone());
    tokio::select! {
        exit = command_loop.run() => {
            if exit == LoopExit::EndOfInput {
                tracing::debug!("Input closed, shutting down");
            }
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            }
            tracing::debug!("Interrupted, shutting down");
        }
    }

    if let Err(e) = scheduler.shutdown() {
        tracing::warn!("Failed to save progress on exit: {}", e);
        Display::show_warning(&format!("{}（{}）", e, e.suggestion()));
    }

    if stop_tx.send(()).is_err() {
        tracing::debug!("Event printer already stopped");
    }
    if let Err(e) = printer.await {
        tracing::warn!("Event printer failed: {}", e);
    }
    Display::show_goodbye();
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

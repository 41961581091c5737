//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The menu and command feedback
//! - The per-second countdown line
//! - Session start/completion lines
//! - Progress views (plain text and JSON)

use std::io::{self, Write};

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::notification::completion_message;
use crate::scheduler::TimerEvent;
use crate::types::{CycleCounters, Durations, SessionKind, Snapshot, TimerState};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the welcome banner.
    pub fn show_welcome() {
        println!("ポモドーロタイマーへようこそ！");
    }

    /// Shows the menu and the input prompt.
    pub fn show_menu() {
        println!();
        println!("操作を選択してください:");
        println!("  s   - タイマー開始");
        println!("  p   - 一時停止");
        println!("  r   - 再開");
        println!("  c   - リセット");
        println!("  set - 時間設定");
        println!("  v   - 進捗表示");
        println!("  q   - 終了");
        Self::prompt("選択: ");
    }

    /// Prints a prompt without a trailing newline.
    pub fn prompt(text: &str) {
        if let Err(e) = Self::write_prompt(&mut io::stdout().lock(), text) {
            debug!("Failed to write prompt: {}", e);
        }
    }

    /// Writes a prompt to `out` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns the write or flush error.
    pub fn write_prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    /// Shows a success message for timer start.
    pub fn show_start_success() {
        println!("* タイマーを開始しました");
    }

    /// Shows a success message for timer pause.
    pub fn show_pause_success(remaining_seconds: u32) {
        println!("|| タイマーを一時停止しました");
        println!("  残り時間: {}", Self::format_time(remaining_seconds));
    }

    /// Shows a success message for timer resume.
    pub fn show_resume_success(remaining_seconds: u32) {
        println!("> タイマーを再開しました");
        println!("  残り時間: {}", Self::format_time(remaining_seconds));
    }

    /// Shows a success message for timer reset.
    pub fn show_reset_success() {
        println!("[] タイマーをリセットしました");
    }

    /// Shows the prompt for one duration field.
    pub fn prompt_duration(label: &str, current_seconds: u32) {
        Self::prompt(&format!(
            "{}を入力してください（現在: {}、空欄で変更なし）: ",
            label,
            Self::format_time(current_seconds)
        ));
    }

    /// Shows the durations after an update.
    pub fn show_durations(durations: &Durations) {
        println!("* 時間設定を更新しました");
        for line in Self::format_durations(durations) {
            println!("  {}", line);
        }
    }

    /// Shows the current progress.
    pub fn show_progress(snapshot: &Snapshot) {
        println!();
        for line in Self::format_progress(snapshot) {
            println!("{}", line);
        }
    }

    /// Shows stored counters.
    pub fn show_counters(counters: &CycleCounters) {
        for line in Self::format_counters(counters) {
            println!("{}", line);
        }
    }

    /// Shows stored counters as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn show_counters_json(counters: &CycleCounters) -> Result<()> {
        let json = serde_json::to_string_pretty(counters).context("Failed to serialize progress")?;
        println!("{}", json);
        Ok(())
    }

    /// Shows one timer event.
    pub fn show_event(event: &TimerEvent) {
        match event {
            TimerEvent::Tick {
                remaining_seconds, ..
            } => Self::prompt(&Self::format_tick(*remaining_seconds)),
            TimerEvent::SessionStarted {
                kind,
                duration_seconds,
            } => println!("\n{}", Self::format_session_started(*kind, *duration_seconds)),
            TimerEvent::SessionCompleted { kind, counters } => {
                println!("\n{}", completion_message(*kind));
                println!(
                    "  完了した作業セッション: {} / 完了したサイクル: {}",
                    counters.work_sessions_completed, counters.cycles_completed
                );
            }
            // Command feedback is printed by the command loop itself.
            TimerEvent::Paused { .. } | TimerEvent::Resumed { .. } | TimerEvent::Reset => {}
        }
    }

    /// Shows the farewell message.
    pub fn show_goodbye() {
        println!("\nポモドーロタイマーを終了します。お疲れさまでした！");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows a warning message.
    pub fn show_warning(message: &str) {
        eprintln!("警告: {}", message);
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// Formats seconds as zero-padded `MM:SS`.
    pub fn format_time(total_seconds: u32) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    /// Formats the countdown line; starts with `\r` to overwrite itself.
    pub fn format_tick(remaining_seconds: u32) -> String {
        format!("\r残り時間: {}", Self::format_time(remaining_seconds))
    }

    /// Formats the session start line.
    pub fn format_session_started(kind: SessionKind, duration_seconds: u32) -> String {
        format!(
            "{}セッションを開始します（{}）",
            kind.label(),
            Self::format_time(duration_seconds)
        )
    }

    /// Formats the durations, one field per line.
    pub fn format_durations(durations: &Durations) -> Vec<String> {
        vec![
            format!("作業: {}", Self::format_time(durations.work_seconds)),
            format!("短い休憩: {}", Self::format_time(durations.short_break_seconds)),
            format!("長い休憩: {}", Self::format_time(durations.long_break_seconds)),
        ]
    }

    /// Formats stored counters.
    pub fn format_counters(counters: &CycleCounters) -> Vec<String> {
        vec![
            format!("完了した作業セッション: {}", counters.work_sessions_completed),
            format!("完了したサイクル: {}", counters.cycles_completed),
        ]
    }

    /// Formats the progress view.
    pub fn format_progress(snapshot: &Snapshot) -> Vec<String> {
        let mut lines = vec!["--- ポモドーロ進捗 ---".to_string()];
        lines.extend(Self::format_counters(&snapshot.counters));

        let state = match snapshot.state {
            TimerState::Idle => "停止中",
            TimerState::Running => "実行中",
            TimerState::Paused => "一時停止中",
        };
        lines.push(format!("状態: {}", state));

        if let Some(kind) = snapshot.session {
            lines.push(format!(
                "{}: 残り {}",
                kind.label(),
                Self::format_time(snapshot.remaining_seconds)
            ));
        }

        lines.push("----------------------".to_string());
        lines
    }
}

/// Prints timer events until the channel closes or `stop` fires.
pub async fn print_events(rx: mpsc::UnboundedReceiver<TimerEvent>, stop: oneshot::Receiver<()>) {
    forward_events(rx, stop, Display::show_event).await;
}

/// Hands each event to `handle` until the channel closes or `stop` fires.
///
/// On stop the channel is closed and events already queued are still
/// handed over before returning.
pub async fn forward_events<F>(
    mut rx: mpsc::UnboundedReceiver<TimerEvent>,
    mut stop: oneshot::Receiver<()>,
    mut handle: F,
) where
    F: FnMut(&TimerEvent),
{
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => handle(&event),
                None => return,
            },
            _ = &mut stop => break,
        }
    }

    rx.close();
    while let Ok(event) = rx.try_recv() {
        handle(&event);
    }
    debug!("Event printer stopped");
}

// ============================================================================
// Tests
// ============================================================================

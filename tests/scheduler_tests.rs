//! Integration tests for the scheduler with file-backed progress.
//!
//! These tests drive the public API end to end on a paused tokio clock:
//! - Session sequencing through a full cycle
//! - Progress persisted across restarts
//! - Pause, reset and duration changes

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::sleep;

use pomocycle::notification::MockNotifier;
use pomocycle::scheduler::{Scheduler, TimerEvent};
use pomocycle::store::{FileProgressStore, ProgressStore};
use pomocycle::types::{
    CycleCounters, Durations, DurationsUpdate, SchedulerConfig, SessionKind, TimerState,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct TestTimer {
    scheduler: Scheduler,
    notifier: Arc<MockNotifier>,
    rx: mpsc::UnboundedReceiver<TimerEvent>,
}

fn create_timer(dir: &TempDir, durations: Durations) -> TestTimer {
    let (tx, rx) = mpsc::unbounded_channel();
    let store = Arc::new(FileProgressStore::new(dir.path().join("progress.txt")));
    let notifier = Arc::new(MockNotifier::new());
    let config = SchedulerConfig::default().with_durations(durations);
    let scheduler = Scheduler::new(config, store, notifier.clone(), tx);
    TestTimer {
        scheduler,
        notifier,
        rx,
    }
}

fn started_sessions(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<SessionKind> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let TimerEvent::SessionStarted { kind, .. } = event {
            kinds.push(kind);
        }
    }
    kinds
}

fn read_progress(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("progress.txt")).unwrap()
}

// ============================================================================
// Cycle Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_two_second_work_session_moves_to_short_break() {
    let dir = TempDir::new().unwrap();
    let mut timer = create_timer(&dir, Durations::new(2, 1, 3));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(2500)).await;

    let snapshot = timer.scheduler.snapshot();
    assert_eq!(snapshot.counters, CycleCounters::new(1, 1));
    assert_eq!(snapshot.session, Some(SessionKind::ShortBreak));
    assert_eq!(snapshot.state, TimerState::Running);
    assert_eq!(read_progress(&dir), "1\n1\n");
    assert_eq!(
        started_sessions(&mut timer.rx),
        vec![SessionKind::Work, SessionKind::ShortBreak]
    );
}

#[tokio::test(start_paused = true)]
async fn test_long_break_after_four_work_sessions() {
    let dir = TempDir::new().unwrap();
    let mut timer = create_timer(&dir, Durations::new(1, 1, 2));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(7500)).await;

    assert_eq!(
        started_sessions(&mut timer.rx),
        vec![
            SessionKind::Work,
            SessionKind::ShortBreak,
            SessionKind::Work,
            SessionKind::ShortBreak,
            SessionKind::Work,
            SessionKind::ShortBreak,
            SessionKind::Work,
            SessionKind::LongBreak,
        ]
    );

    let snapshot = timer.scheduler.snapshot();
    assert_eq!(snapshot.counters, CycleCounters::new(4, 7));
    assert_eq!(snapshot.remaining_seconds, 2);
    assert_eq!(timer.notifier.notify_count(), 7);
    assert_eq!(read_progress(&dir), "4\n7\n");
}

#[tokio::test(start_paused = true)]
async fn test_long_break_is_followed_by_work() {
    let dir = TempDir::new().unwrap();
    let mut timer = create_timer(&dir, Durations::new(1, 1, 2));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(9500)).await;

    let sessions = started_sessions(&mut timer.rx);
    assert_eq!(sessions.last(), Some(&SessionKind::Work));
    assert_eq!(timer.scheduler.snapshot().counters, CycleCounters::new(4, 8));
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_progress_restored_after_restart() {
    let dir = TempDir::new().unwrap();
    let timer = create_timer(&dir, Durations::new(1, 1, 1));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(3500)).await;
    let saved = timer.scheduler.shutdown().unwrap();
    assert_eq!(saved, CycleCounters::new(2, 3));

    let restarted = create_timer(&dir, Durations::new(1, 1, 1));
    let snapshot = restarted.scheduler.snapshot();
    assert_eq!(snapshot.state, TimerState::Idle);
    assert_eq!(snapshot.counters, CycleCounters::new(2, 3));
}

#[tokio::test]
async fn test_missing_progress_file_starts_from_zero() {
    let dir = TempDir::new().unwrap();
    let timer = create_timer(&dir, Durations::default());

    assert_eq!(timer.scheduler.snapshot().counters, CycleCounters::default());
}

#[tokio::test]
async fn test_malformed_progress_file_keeps_leading_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.txt"), "7 oops 3").unwrap();

    let timer = create_timer(&dir, Durations::default());

    assert_eq!(timer.scheduler.snapshot().counters, CycleCounters::new(7, 0));
}

#[test]
fn test_store_writes_nested_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("progress.txt");
    let store = FileProgressStore::new(&path);

    store.save(&CycleCounters::new(5, 9)).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "5\n9\n");
    assert_eq!(store.load(), CycleCounters::new(5, 9));
}

// ============================================================================
// Command Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_paused_time_is_not_counted() {
    let dir = TempDir::new().unwrap();
    let timer = create_timer(&dir, Durations::new(3, 1, 1));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(timer.scheduler.pause().unwrap(), 2);

    sleep(Duration::from_secs(120)).await;
    let snapshot = timer.scheduler.snapshot();
    assert_eq!(snapshot.state, TimerState::Paused);
    assert_eq!(snapshot.remaining_seconds, 2);

    assert_eq!(timer.scheduler.resume().unwrap(), 2);
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(timer.scheduler.snapshot().session, Some(SessionKind::ShortBreak));
}

#[tokio::test(start_paused = true)]
async fn test_reset_returns_to_idle_with_zero_counters() {
    let dir = TempDir::new().unwrap();
    let timer = create_timer(&dir, Durations::new(1, 5, 5));

    timer.scheduler.start().unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(timer.scheduler.snapshot().counters, CycleCounters::new(1, 1));

    timer.scheduler.reset();
    sleep(Duration::from_secs(10)).await;

    let snapshot = timer.scheduler.snapshot();
    assert_eq!(snapshot.state, TimerState::Idle);
    assert_eq!(snapshot.session, None);
    assert_eq!(snapshot.counters, CycleCounters::default());
    assert!(timer.scheduler.resume().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_new_durations_apply_from_next_session() {
    let dir = TempDir::new().unwrap();
    let mut timer = create_timer(&dir, Durations::new(2, 1, 1));

    timer.scheduler.start().unwrap();
    let rejected = timer
        .scheduler
        .set_durations(&DurationsUpdate::default().with_short_break(30).with_work(-1));
    assert_eq!(rejected.len(), 1);

    sleep(Duration::from_millis(2500)).await;

    let snapshot = timer.scheduler.snapshot();
    assert_eq!(snapshot.session, Some(SessionKind::ShortBreak));
    assert_eq!(snapshot.remaining_seconds, 30);
    assert_eq!(snapshot.durations, Durations::new(2, 30, 1));
    assert_eq!(
        started_sessions(&mut timer.rx),
        vec![SessionKind::Work, SessionKind::ShortBreak]
    );
}

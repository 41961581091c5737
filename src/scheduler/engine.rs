//! Scheduler engine for the Pomodoro Timer.
//!
//! This module wraps [`SchedulerCore`] with the concurrency it needs:
//! - A single mutex serializing every state change
//! - A background countdown task ticking once per second
//! - A wake signal the countdown waits on while paused
//! - An epoch check so a cancelled countdown exits on its next iteration
//! - Event firing for display, plus persistence and notification hooks

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, Notify};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use super::error::SchedulerError;
use super::state::{SchedulerCore, SessionCompletion, TickOutcome};
use crate::notification::SessionNotifier;
use crate::store::{ProgressStore, StoreError};
use crate::types::{
    CycleCounters, DurationsUpdate, SchedulerConfig, SessionKind, Snapshot, TimerState,
};

/// Wall-clock time between two countdown decrements.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for display and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A session began with its full duration
    SessionStarted {
        kind: SessionKind,
        duration_seconds: u32,
    },
    /// One second elapsed
    Tick {
        kind: SessionKind,
        remaining_seconds: u32,
    },
    /// A session ran to zero
    SessionCompleted {
        kind: SessionKind,
        counters: CycleCounters,
    },
    /// Countdown frozen
    Paused { remaining_seconds: u32 },
    /// Countdown continued
    Resumed { remaining_seconds: u32 },
    /// Countdown cancelled and counters cleared
    Reset,
}

// ============================================================================
// Scheduler
// ============================================================================

struct Shared {
    core: Mutex<SchedulerCore>,
    wake: Notify,
    store: Arc<dyn ProgressStore>,
    notifier: Arc<dyn SessionNotifier>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

/// Handle to the session scheduler.
///
/// Cloning is cheap; every clone controls the same scheduler. Commands are
/// synchronous and never wait on the countdown, but `start` must be called
/// from within a tokio runtime because it spawns the countdown task.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    /// Creates an idle scheduler, restoring counters from the store.
    pub fn new(
        config: SchedulerConfig,
        store: Arc<dyn ProgressStore>,
        notifier: Arc<dyn SessionNotifier>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let counters = store.load();
        info!(
            work_sessions = counters.work_sessions_completed,
            cycles = counters.cycles_completed,
            "Progress restored"
        );

        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(SchedulerCore::new(config, counters)),
                wake: Notify::new(),
                store,
                notifier,
                event_tx,
            }),
        }
    }

    /// Starts the cycle with a work session.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRunning` if a countdown is running or paused.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let (epoch, duration_seconds) = {
            let mut core = self.lock();
            let epoch = core.start()?;
            (epoch, core.durations().work_seconds)
        };

        info!(epoch, "Timer started");
        self.emit(TimerEvent::SessionStarted {
            kind: SessionKind::Work,
            duration_seconds,
        });

        tokio::spawn(self.clone().run_countdown(epoch));
        Ok(())
    }

    /// Pauses the running countdown.
    ///
    /// Returns the frozen remaining seconds.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` if the countdown is not running.
    pub fn pause(&self) -> Result<u32, SchedulerError> {
        let remaining_seconds = self.lock().pause()?;

        info!(remaining_seconds, "Timer paused");
        self.emit(TimerEvent::Paused { remaining_seconds });
        Ok(remaining_seconds)
    }

    /// Resumes a paused countdown.
    ///
    /// Returns the remaining seconds the countdown continues from.
    ///
    /// # Errors
    ///
    /// Returns `NotPaused` if the countdown is not paused.
    pub fn resume(&self) -> Result<u32, SchedulerError> {
        let remaining_seconds = self.lock().resume()?;
        self.shared.wake.notify_waiters();

        info!(remaining_seconds, "Timer resumed");
        self.emit(TimerEvent::Resumed { remaining_seconds });
        Ok(remaining_seconds)
    }

    /// Cancels any countdown and clears the counters. Always succeeds.
    pub fn reset(&self) {
        self.lock().reset();
        self.shared.wake.notify_waiters();

        info!("Timer reset");
        self.emit(TimerEvent::Reset);
    }

    /// Applies a duration update from the next session boundary.
    ///
    /// Returns the rejected fields; valid fields are applied regardless.
    #[must_use]
    pub fn set_durations(&self, update: &DurationsUpdate) -> Vec<SchedulerError> {
        let rejected = self.lock().set_durations(update);
        debug!(rejected = rejected.len(), "Durations updated");
        rejected
    }

    /// Returns a read-only view of the scheduler.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Cancels any countdown and saves the counters.
    ///
    /// Returns the counters that were saved.
    ///
    /// # Errors
    ///
    /// Returns the store error if saving fails; the scheduler is idle either way.
    pub fn shutdown(&self) -> Result<CycleCounters, StoreError> {
        let counters = {
            let mut core = self.lock();
            core.cancel();
            core.counters()
        };
        self.shared.wake.notify_waiters();

        info!("Scheduler shut down");
        self.shared.store.save(&counters)?;
        Ok(counters)
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerCore> {
        self.shared
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: TimerEvent) {
        if self.shared.event_tx.send(event).is_err() {
            debug!("Timer event dropped: no receiver");
        }
    }

    // ------------------------------------------------------------------------
    // Countdown task
    // ------------------------------------------------------------------------

    /// Runs the countdown of run `epoch` until it is cancelled.
    async fn run_countdown(self, epoch: u64) {
        debug!(epoch, "Countdown started");

        while self.wait_until_running(epoch).await {
            sleep(TICK_INTERVAL).await;

            match self.advance(epoch) {
                TickOutcome::Stale => break,
                TickOutcome::Suspended => continue,
                TickOutcome::Counting {
                    kind,
                    remaining_seconds,
                } => self.emit(TimerEvent::Tick {
                    kind,
                    remaining_seconds,
                }),
                TickOutcome::Completed(completion) => self.finish_session(completion),
            }
        }

        debug!(epoch, "Countdown exited");
    }

    /// Blocks while paused.
    ///
    /// Returns false once run `epoch` has been cancelled.
    async fn wait_until_running(&self, epoch: u64) -> bool {
        loop {
            // Register before checking so a resume between the check and
            // the await is not lost.
            let notified = self.shared.wake.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let core = self.lock();
                if core.epoch() != epoch {
                    return false;
                }
                match core.state() {
                    TimerState::Running => return true,
                    TimerState::Idle => return false,
                    TimerState::Paused => {}
                }
            }

            notified.await;
        }
    }

    /// Ticks the core; saves progress under the lock when work completes.
    fn advance(&self, epoch: u64) -> TickOutcome {
        let mut core = self.lock();
        let outcome = core.tick(epoch);

        if let TickOutcome::Completed(completion) = &outcome {
            if completion.completed == SessionKind::Work {
                if let Err(e) = self.shared.store.save(&completion.counters) {
                    warn!("Failed to save progress: {}", e);
                }
            }
        }

        outcome
    }

    fn finish_session(&self, completion: SessionCompletion) {
        let SessionCompletion {
            completed,
            next,
            next_duration_seconds,
            counters,
        } = completion;

        info!(
            session = completed.as_str(),
            work_sessions = counters.work_sessions_completed,
            cycles = counters.cycles_completed,
            "Session completed"
        );

        self.emit(TimerEvent::Tick {
            kind: completed,
            remaining_seconds: 0,
        });
        self.emit(TimerEvent::SessionCompleted {
            kind: completed,
            counters,
        });

        if let Err(e) = self.shared.notifier.notify(completed) {
            warn!("Failed to notify session completion: {}", e);
        }

        self.emit(TimerEvent::SessionStarted {
            kind: next,
            duration_seconds: next_duration_seconds,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

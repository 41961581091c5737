//! Progress persistence for the Pomodoro Timer.
//!
//! Only two counters survive a restart: completed work sessions and
//! completed cycles. They are loaded at startup, written after each
//! completed work session, and written again at clean shutdown.

mod error;
mod file;

pub use error::StoreError;
pub use file::{
    default_progress_path, format_progress, parse_progress, FileProgressStore, PROGRESS_FILE_NAME,
};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::types::CycleCounters;

/// Trait for progress store implementations.
pub trait ProgressStore: Send + Sync {
    /// Loads the stored counters.
    ///
    /// A missing or malformed store yields zero counters; this never fails.
    fn load(&self) -> CycleCounters;

    /// Persists the counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save(&self, counters: &CycleCounters) -> Result<(), StoreError>;
}

/// In-memory progress store for testing.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    stored: Mutex<CycleCounters>,
    save_calls: Mutex<Vec<CycleCounters>>,
    should_fail: AtomicBool,
}

impl MemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given counters.
    #[must_use]
    pub fn with_counters(counters: CycleCounters) -> Self {
        Self {
            stored: Mutex::new(counters),
            ..Self::default()
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn stored(&self) -> CycleCounters {
        *self.stored.lock().unwrap()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_save_calls(&self) -> Vec<CycleCounters> {
        self.save_calls.lock().unwrap().clone()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> CycleCounters {
        self.stored()
    }

    fn save(&self, counters: &CycleCounters) -> Result<(), StoreError> {
        self.save_calls.lock().unwrap().push(*counters);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("Mock failure"),
            });
        }
        *self.stored.lock().unwrap() = *counters;
        Ok(())
    }
}

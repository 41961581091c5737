//! File-backed progress store.
//!
//! The file holds two whitespace-separated non-negative integers:
//! completed work sessions, then completed cycles.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::StoreError;
use super::ProgressStore;
use crate::types::CycleCounters;

/// File name used for the progress file.
pub const PROGRESS_FILE_NAME: &str = "pomodoro_progress.txt";

/// Returns the default progress file location.
///
/// Uses the platform's local data directory when available and falls back to
/// the working directory otherwise.
pub fn default_progress_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("pomocycle").join(PROGRESS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(PROGRESS_FILE_NAME))
}

/// Parses progress file content.
///
/// Reads as many leading valid integers as possible (at most two) and
/// defaults the rest to zero.
pub fn parse_progress(content: &str) -> CycleCounters {
    let mut values = content
        .split_whitespace()
        .map_while(|token| token.parse::<u32>().ok())
        .fuse();

    CycleCounters {
        work_sessions_completed: values.next().unwrap_or(0),
        cycles_completed: values.next().unwrap_or(0),
    }
}

/// Formats counters as progress file content.
pub fn format_progress(counters: &CycleCounters) -> String {
    format!(
        "{}\n{}\n",
        counters.work_sessions_completed, counters.cycles_completed
    )
}

/// Progress store backed by a plain text file.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    /// Creates a store for the given file path. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the progress file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the counters, reporting read failures other than a missing file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file exists but cannot be read.
    pub fn try_load(&self) -> Result<CycleCounters, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_progress(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No progress file at {}", self.path.display());
                Ok(CycleCounters::default())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> CycleCounters {
        match self.try_load() {
            Ok(counters) => counters,
            Err(e) => {
                warn!("{}", e);
                CycleCounters::default()
            }
        }
    }

    fn save(&self, counters: &CycleCounters) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, format_progress(counters)).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            work_sessions = counters.work_sessions_completed,
            cycles = counters.cycles_completed,
            "Progress saved to {}",
            self.path.display()
        );
        Ok(())
    }
}

//! Progress store error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the progress file.
///
/// None of these are fatal: the in-memory counters stay authoritative for
/// the running process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the progress file.
    #[error("進捗ファイルの読み込みに失敗しました ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the progress file.
    #[error("進捗ファイルの書き込みに失敗しました ({}): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to create the directory that holds the progress file.
    #[error("進捗ディレクトリの作成に失敗しました ({}): {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Returns the path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::CreateDir { path, .. } => {
                path
            }
        }
    }

    /// Returns true if the failure happened while writing.
    #[must_use]
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::CreateDir { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Read { .. } => "ファイルの権限を確認してください",
            Self::Write { .. } => "ディスクの空き容量と権限を確認してください",
            Self::CreateDir { .. } => "--progress-file で別の保存先を指定してください",
        }
    }
}

//! Notification error types.

use thiserror::Error;

/// Errors that can occur while alerting the user.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The alert could not be written to its output.
    #[error("通知の送信に失敗しました: {0}")]
    SendFailed(String),

    /// The output device is not available (e.g., stdout was closed).
    #[error("通知先が利用できません")]
    NotAvailable,
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "端末の設定を確認してください",
            Self::NotAvailable => "--no-sound で通知を無効にできます",
        }
    }
}

//! Scheduler error types.

use thiserror::Error;

use crate::types::DurationField;

/// Errors returned by scheduler commands.
///
/// Every variant leaves the scheduler state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// `start` was called while a countdown is active.
    #[error("タイマーは既に実行中です")]
    AlreadyRunning,

    /// `pause` was called while not counting down.
    #[error("一時停止できるタイマーがありません")]
    NotRunning,

    /// `resume` was called while not paused.
    #[error("再開できる一時停止中のタイマーがありません")]
    NotPaused,

    /// A duration value was rejected; the previous value is kept.
    #[error("{field}が無効です（{reason}）。以前の値を保持します")]
    InvalidDuration { field: DurationField, reason: String },
}

impl SchedulerError {
    /// Creates an `InvalidDuration` error.
    pub fn invalid_duration(field: DurationField, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true if this error is an illegal state transition.
    #[must_use]
    pub fn is_transition_error(&self) -> bool {
        matches!(self, Self::AlreadyRunning | Self::NotRunning | Self::NotPaused)
    }

    /// Returns the rejected field for `InvalidDuration`.
    #[must_use]
    pub fn field(&self) -> Option<DurationField> {
        match self {
            Self::InvalidDuration { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(SchedulerError::AlreadyRunning
            .to_string()
            .contains("既に実行中"));
        assert!(SchedulerError::NotRunning.to_string().contains("一時停止できる"));
        assert!(SchedulerError::NotPaused.to_string().contains("再開できる"));

        let err = SchedulerError::invalid_duration(DurationField::Work, "正の値ではありません");
        let message = err.to_string();
        assert!(message.contains("作業時間"));
        assert!(message.contains("正の値ではありません"));
    }

    #[test]
    fn test_is_transition_error() {
        assert!(SchedulerError::AlreadyRunning.is_transition_error());
        assert!(SchedulerError::NotRunning.is_transition_error());
        assert!(SchedulerError::NotPaused.is_transition_error());
        assert!(!SchedulerError::invalid_duration(DurationField::Work, "x").is_transition_error());
    }

    #[test]
    fn test_field() {
        let err = SchedulerError::invalid_duration(DurationField::LongBreak, "x");
        assert_eq!(err.field(), Some(DurationField::LongBreak));
        assert_eq!(SchedulerError::NotPaused.field(), None);
    }
}

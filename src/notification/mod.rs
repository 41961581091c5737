//! Session completion alerts.
//!
//! The scheduler calls a [`SessionNotifier`] every time a session runs to
//! completion. The default implementation rings the terminal bell; the
//! command loop prints the matching message line. Any other alert (desktop
//! notification, sound file) can be plugged in by implementing the trait.
//!
//! ```rust
//! use pomocycle::notification::{MockNotifier, SessionNotifier};
//! use pomocycle::types::SessionKind;
//!
//! let notifier = MockNotifier::new();
//! notifier.notify(SessionKind::Work).unwrap();
//! assert_eq!(notifier.notify_count(), 1);
//! ```

mod bell;
mod error;

pub use bell::TerminalBell;
pub use error::NotificationError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::types::SessionKind;

/// Trait for completion alert implementations.
pub trait SessionNotifier: Send + Sync {
    /// Alerts the user that a session of the given kind has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered. Callers log it
    /// and carry on.
    fn notify(&self, kind: SessionKind) -> Result<(), NotificationError>;
}

/// Returns the message shown when a session of the given kind completes.
#[must_use]
pub fn completion_message(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Work => "作業時間が終了しました。休憩してください。",
        SessionKind::ShortBreak => "休憩時間が終了しました。作業を再開してください。",
        SessionKind::LongBreak => "長い休憩が終了しました。新しいサイクルを始めましょう。",
    }
}

/// Notifier that does nothing (used with `--no-sound`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl SessionNotifier for SilentNotifier {
    fn notify(&self, _kind: SessionKind) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    calls: Mutex<Vec<SessionKind>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn notify_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_calls(&self) -> Vec<SessionKind> {
        self.calls.lock().unwrap().clone()
    }
}

impl SessionNotifier for MockNotifier {
    fn notify(&self, kind: SessionKind) -> Result<(), NotificationError> {
        self.calls.lock().unwrap().push(kind);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        Ok(())
    }
}

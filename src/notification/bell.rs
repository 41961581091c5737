//! Terminal bell notifier.

use std::io::{self, Write};
use std::sync::Mutex;

use tracing::debug;

use super::error::NotificationError;
use super::SessionNotifier;
use crate::types::SessionKind;

/// ASCII BEL; most terminals beep or flash on it.
const BELL: &[u8] = b"\x07";

/// Notifier that rings the terminal bell on its output.
///
/// The writer is injectable so the alert can be observed in tests.
pub struct TerminalBell<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl TerminalBell<io::Stdout> {
    /// Creates a bell that writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    /// Creates a bell that writes to the given writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the bell and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> SessionNotifier for TerminalBell<W> {
    fn notify(&self, kind: SessionKind) -> Result<(), NotificationError> {
        let mut out = self.out.lock().map_err(|_| NotificationError::NotAvailable)?;

        out.write_all(BELL)
            .and_then(|()| out.flush())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!("Bell rung for {} completion", kind.as_str());
        Ok(())
    }
}

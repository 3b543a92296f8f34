//! Advisory notices produced by the ledger.

use alloc::string::String;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Something completed.
    Success,
    /// Input was rejected or a player is close to elimination.
    Warning,
    /// A round was refused or a player was eliminated.
    Danger,
}

/// A message the ledger wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable text.
    pub message: String,
    /// How prominently to show it.
    pub severity: Severity,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Receives notices; delivery is fire-and-forget.
pub trait Notifier {
    /// Shows a message.
    fn notify(&mut self, message: &str, severity: Severity);
}

impl<F: FnMut(&str, Severity)> Notifier for F {
    fn notify(&mut self, message: &str, severity: Severity) {
        self(message, severity);
    }
}

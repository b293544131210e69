//! Single-slot HUD alert channel.

use starwake_core::constants::ALERT_DURATION_TICKS;
use starwake_core::enums::AlertSeverity;
use starwake_core::events::Alert;

/// Holds the alert currently shown. A new alert replaces it when at least as
/// severe, or once the current one has expired.
#[derive(Debug, Clone, Default)]
pub struct AlertChannel {
    current: Option<Alert>,
}

impl AlertChannel {
    pub fn raise(&mut self, severity: AlertSeverity, message: impl Into<String>, tick: u64) {
        let message = message.into();
        if let Some(current) = &self.current {
            let live = tick.saturating_sub(current.tick) < ALERT_DURATION_TICKS;
            if live && current.message == message {
                return;
            }
            if live && current.severity > severity {
                return;
            }
        }
        self.current = Some(Alert {
            severity,
            message,
            tick,
        });
    }

    pub fn info(&mut self, message: impl Into<String>, tick: u64) {
        self.raise(AlertSeverity::Info, message, tick);
    }

    pub fn success(&mut self, message: impl Into<String>, tick: u64) {
        self.raise(AlertSeverity::Success, message, tick);
    }

    pub fn warning(&mut self, message: impl Into<String>, tick: u64) {
        self.raise(AlertSeverity::Warning, message, tick);
    }

    pub fn error(&mut self, message: impl Into<String>, tick: u64) {
        self.raise(AlertSeverity::Error, message, tick);
    }

    /// The alert to display at `tick`, if it has not expired.
    pub fn current(&self, tick: u64) -> Option<Alert> {
        self.current
            .as_ref()
            .filter(|a| tick.saturating_sub(a.tick) < ALERT_DURATION_TICKS)
            .cloned()
    }
}

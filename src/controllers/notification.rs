//! # controllers::notification
//!
//! **Notification Controller** — the single toast slot.
//!
//! ```text
//!          show()                 show()
//!  Idle ───────────▶ Showing ◀──────────┐
//!   ▲                   │  └────────────┘  (replace + new generation)
//!   └───────────────────┘
//!     expire(gen) where gen == current generation
//! ```
//!
//! The controller itself owns no timer.  Every `show()` hands back a
//! generation number; whoever schedules the dismiss (the dashboard) passes it
//! back to [`NotificationController::expire`] after [`NOTIFICATION_TTL`].  An
//! expiry for an older generation is a no-op, so a replaced toast can never
//! take the new one down with it.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

/// How long a toast stays up after the most recent `show()`.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message:  String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationState {
    Idle,
    Showing {
        notification: Notification,
        generation:   u64,
    },
}

#[derive(Debug)]
pub struct NotificationController {
    state:      NotificationState,
    generation: u64,
}

impl NotificationController {
    pub fn new() -> Self {
        Self {
            state:      NotificationState::Idle,
            generation: 0,
        }
    }

    /// Replace whatever is showing (last write wins) and return the
    /// generation the caller must use to expire it.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.generation += 1;
        let notification = Notification {
            message: message.into(),
            severity,
        };
        debug!(generation = self.generation, ?severity, message = %notification.message, "Notification shown");
        self.state = NotificationState::Showing {
            notification,
            generation: self.generation,
        };
        self.generation
    }

    /// Dismiss timer callback.  Returns `true` if the toast was removed.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.state {
            NotificationState::Showing { generation: current, .. } if *current == generation => {
                debug!(generation, "Notification expired");
                self.state = NotificationState::Idle;
                true
            }
            _ => {
                debug!(generation, current = self.generation, "Stale dismiss timer ignored");
                false
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        match &self.state {
            NotificationState::Showing { notification, .. } => Some(notification),
            NotificationState::Idle => None,
        }
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Generation of the most recent `show()` (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for NotificationController {
    fn default() -> Self {
        Self::new()
    }
}

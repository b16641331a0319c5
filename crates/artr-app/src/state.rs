//! Observable application state types.
//!
//! The [`Notification`] is the page's only transient state: an error message
//! that stays open until dismissed or until its lifetime runs out.

use std::time::Duration;

/// How long a notification stays open without user action.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(8);

/// Why a notification close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Close button pressed.
    CloseButton,
    /// Click somewhere outside the notification. Ignored.
    ClickAway,
    /// Frontend timer expired.
    Timeout,
}

/// Open error notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message shown to the user.
    pub message: String,
    /// Time left before the notification hides itself.
    pub remaining: Duration,
}

impl Notification {
    /// Open a notification with the full lifetime.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), remaining: NOTIFICATION_DURATION }
    }

    /// Count down by `elapsed`. Returns `true` once the lifetime is used up.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining.is_zero()
    }
}

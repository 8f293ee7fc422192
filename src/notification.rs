//! Short-lived reports shown on the bottom row: loads, refused or failed
//! exports, unreadable documents.

use std::time::{Duration, Instant};

/// At most this many reports are kept; older ones are dropped.
const MAX_QUEUED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Errors stay up longer than confirmations.
    fn lifetime(self) -> Duration {
        match self {
            NotificationLevel::Info => Duration::from_secs(4),
            NotificationLevel::Warning => Duration::from_secs(6),
            NotificationLevel::Error => Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Newest-first queue of reports.
#[derive(Debug, Default)]
pub struct NotificationManager {
    queue: Vec<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `message`. Repeating the report on top of the queue only
    /// restarts its timer.
    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let message = message.into();
        let lifetime = level.lifetime();

        if let Some(top) = self.queue.first_mut()
            && top.message == message
            && top.level == level
        {
            top.expires_at = Instant::now() + lifetime;
            return;
        }

        self.queue.insert(0, Notification::new(message, level, lifetime));
        self.queue.truncate(MAX_QUEUED);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Info);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Error);
    }

    /// Drops expired reports; true when something disappeared.
    pub fn update_at(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| !n.is_expired_at(now));
        self.queue.len() != before
    }

    pub fn current(&self) -> Option<&Notification> {
        self.queue.first()
    }

    pub fn dismiss_current(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        self.queue.remove(0);
        true
    }

    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn count(&self) -> usize {
        self.queue.len()
    }
}

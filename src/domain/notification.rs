//! Transient advisory messages.
//!
//! At most one notification of each kind is visible; posting a new one
//! replaces the old. Each expires a fixed time after it was posted.

use std::time::{Duration, Instant};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct NotificationBoard {
    ttl: Duration,
    error: Option<Notification>,
    success: Option<Notification>,
}

impl NotificationBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            error: None,
            success: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn slot(&mut self, kind: NotificationKind) -> &mut Option<Notification> {
        match kind {
            NotificationKind::Error => &mut self.error,
            NotificationKind::Success => &mut self.success,
        }
    }

    pub fn get(&self, kind: NotificationKind) -> Option<&Notification> {
        match kind {
            NotificationKind::Error => self.error.as_ref(),
            NotificationKind::Success => self.success.as_ref(),
        }
    }

    /// Post a message, replacing any visible notification of the same kind.
    pub fn post(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> &Notification {
        let expires_at = now + self.ttl;
        self.slot(kind).insert(Notification {
            kind,
            message: message.into(),
            expires_at,
        })
    }

    /// Drop notifications whose time is up. Returns the kinds removed.
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationKind> {
        let mut removed = Vec::new();
        for kind in [NotificationKind::Error, NotificationKind::Success] {
            let slot = self.slot(kind);
            if slot.as_ref().is_some_and(|n| n.is_expired(now)) {
                *slot = None;
                removed.push(kind);
            }
        }
        removed
    }

    /// Remove everything. Returns the kinds that were visible.
    pub fn clear(&mut self) -> Vec<NotificationKind> {
        let mut removed = Vec::new();
        for kind in [NotificationKind::Error, NotificationKind::Success] {
            if self.slot(kind).take().is_some() {
                removed.push(kind);
            }
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

impl Default for NotificationBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

//! Transient toast notifications.

use std::time::{Duration, Instant};

/// How long a success toast stays up.
pub const SUCCESS_TTL: Duration = Duration::from_secs(3);
/// How long an error toast stays up.
pub const ERROR_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Success => SUCCESS_TTL,
            Self::Error => ERROR_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of toasts, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Notifications {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at: now + kind.ttl(),
        });
        self.next_id
    }

    /// Toasts still on screen at `now`.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().filter(move |t| t.expires_at > now)
    }

    /// Drop expired toasts. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Every toast not yet pruned, oldest first.
    #[must_use]
    pub fn all(&self) -> &[Toast] {
        &self.toasts
    }
}

//! Transient single-slot notification channel.
//!
//! Depth 1: a new message immediately replaces whatever is showing and
//! restarts the auto-dismiss timer. There is no backlog — only the latest
//! notification is ever visible.

use std::time::{Duration, Instant};

/// How long a toast stays up before auto-dismissing.
pub const TOAST_TTL: Duration = Duration::from_millis(2600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
}

#[derive(Debug)]
pub struct ToastChannel {
    ttl: Duration,
    current: Option<(Toast, Instant)>,
}

impl ToastChannel {
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>, variant: ToastVariant, now: Instant) {
        self.current = Some((
            Toast {
                message: message.into(),
                variant,
            },
            now,
        ));
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, ToastVariant::Info, now);
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, ToastVariant::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, ToastVariant::Error, now);
    }

    /// Dismiss the current toast once its timer has run out.
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, shown_at)) = self.current {
            if now.duration_since(shown_at) >= self.ttl {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }
}

impl Default for ToastChannel {
    fn default() -> Self {
        Self::new()
    }
}

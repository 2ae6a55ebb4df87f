//! Transient success and error messages shown over every screen.

use chrono::{DateTime, TimeDelta, Utc};
use estate_states::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl State for Notifications {}

impl Notifications {
    pub const LIFETIME: TimeDelta = TimeDelta::seconds(4);

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.toasts.push(Toast {
            kind,
            message: message.into(),
            created_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.push(ToastKind::Success, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.push(ToastKind::Error, message, now);
    }

    pub fn info(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.push(ToastKind::Info, message, now);
    }

    /// Drop toasts older than [`Self::LIFETIME`].
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.toasts
            .retain(|toast| now.signed_duration_since(toast.created_at) < Self::LIFETIME);
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

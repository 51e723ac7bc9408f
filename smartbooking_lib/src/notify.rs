//! User-facing feedback: transient success and failure notifications.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warn,
    Error,
}

/// A toast-style message for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Notification {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            summary: "Success".to_string(),
            detail: detail.into(),
        }
    }

    pub fn warn(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: "Error".to_string(),
            detail: detail.into(),
        }
    }
}

/// Notification channel owned by the renderer.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Success => tracing::info!("{}: {}", n.summary, n.detail),
            Severity::Warn => tracing::warn!("{}: {}", n.summary, n.detail),
            Severity::Error => tracing::error!("{}: {}", n.summary, n.detail),
        }
    }
}

/// Keeps every notification in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

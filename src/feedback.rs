//! Workflow feedback channel
//!
//! Action outcomes surface through an explicit channel owned by the
//! application shell and injected into call sites. The channel is
//! last-write-wins: a newer toast replaces an undelivered older one, which
//! is the intended behavior — concurrent toasts are not queued.
//!
//! Load failures do not go through here; they stay component-local inline
//! state (see [`OriginationForm::load_error`](crate::origination::OriginationForm::load_error)).

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

/// Toast auto-dismiss delay.
pub const TOAST_DISMISS_MS: i64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub issued_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            issued_at: Utc::now(),
        }
    }

    /// Instant after which the shell should drop the toast if the user has
    /// not dismissed it.
    pub fn dismiss_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::milliseconds(TOAST_DISMISS_MS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.dismiss_at()
    }
}

/// Publishing handle; cheap to clone and hand to any workflow.
#[derive(Clone)]
pub struct ToastSender {
    tx: watch::Sender<Option<Toast>>,
}

impl ToastSender {
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        // send_replace never fails and overwrites any undelivered toast
        self.tx.send_replace(Some(Toast::new(message, kind)));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Info);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Warning);
    }
}

/// Consuming side, owned by the application shell (single consumer).
pub struct ToastReceiver {
    rx: watch::Receiver<Option<Toast>>,
}

impl ToastReceiver {
    /// Latest toast, if any has been shown.
    pub fn current(&mut self) -> Option<Toast> {
        self.rx.borrow_and_update().clone()
    }

    /// Wait until a new toast replaces the current value.
    pub async fn changed(&mut self) -> Option<Toast> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        self.rx.borrow_and_update().clone()
    }
}

/// Create a connected sender/receiver pair.
pub fn toast_channel() -> (ToastSender, ToastReceiver) {
    let (tx, rx) = watch::channel(None);
    (ToastSender { tx }, ToastReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let (tx, mut rx) = toast_channel();

        tx.success("saved");
        tx.error("failed");

        // Only the latest toast is observable
        let toast = rx.current().expect("toast present");
        assert_eq!(toast.message, "failed");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn test_empty_channel_has_no_toast() {
        let (_tx, mut rx) = toast_channel();
        assert!(rx.current().is_none());
    }

    #[test]
    fn test_dismiss_deadline() {
        let toast = Toast::new("done", ToastKind::Success);
        assert!(!toast.is_expired(toast.issued_at));
        assert!(toast.is_expired(toast.issued_at + Duration::milliseconds(TOAST_DISMISS_MS)));
    }

    #[tokio::test]
    async fn test_changed_delivers_latest() {
        let (tx, mut rx) = toast_channel();

        tx.info("first");
        let toast = rx.changed().await.expect("toast delivered");
        assert_eq!(toast.message, "first");
    }
}

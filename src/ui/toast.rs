//! Transient notifications. Handlers talk to a [`Notifier`]; the [`ToastContainer`]
//! implementation keeps the visible stack and schedules each toast's dismissal on the
//! tokio runtime. Toast text is user-facing and must never contain tokens.

use super::page::AlertKind;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{runtime::Handle, time::sleep};
use tracing::debug;

/// How long a toast stays before it starts to slide out.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);
/// Length of the slide-out animation before the toast is removed.
pub const TOAST_EXIT_ANIMATION: Duration = Duration::from_millis(300);

pub trait Notifier: Send + Sync {
    fn show_toast(&self, message: &str, kind: AlertKind, duration: Duration);

    /// Shows a toast for the default duration.
    fn notify(&self, message: &str, kind: AlertKind) {
        self.show_toast(message, kind, DEFAULT_TOAST_DURATION);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Dismissing,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: AlertKind,
    pub phase: ToastPhase,
}

#[derive(Debug, Default)]
struct ToastStack {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// The `toastContainer` element: a shared, cloneable stack of active toasts.
#[derive(Clone, Debug, Default)]
pub struct ToastContainer {
    stack: Arc<Mutex<ToastStack>>,
}

impl ToastContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the toasts currently in the container, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.stack
            .lock()
            .map(|stack| stack.toasts.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|toast| toast.message).collect()
    }

    fn push(&self, message: &str, kind: AlertKind) -> Option<u64> {
        let mut stack = self.stack.lock().ok()?;
        stack.next_id += 1;
        let id = stack.next_id;
        stack.toasts.push(Toast {
            id,
            message: message.to_string(),
            kind,
            phase: ToastPhase::Visible,
        });
        Some(id)
    }

    fn start_dismissal(&self, id: u64) {
        if let Ok(mut stack) = self.stack.lock() {
            if let Some(toast) = stack.toasts.iter_mut().find(|toast| toast.id == id) {
                toast.phase = ToastPhase::Dismissing;
            }
        }
    }

    fn remove(&self, id: u64) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.toasts.retain(|toast| toast.id != id);
        }
    }
}

impl Notifier for ToastContainer {
    fn show_toast(&self, message: &str, kind: AlertKind, duration: Duration) {
        let Some(id) = self.push(message, kind) else {
            return;
        };

        // Without a runtime there is nothing to drive the timers; the toast stays.
        let Ok(handle) = Handle::try_current() else {
            debug!("no runtime available, toast {id} will not auto-dismiss");
            return;
        };

        let container = self.clone();
        handle.spawn(async move {
            sleep(duration).await;
            container.start_dismissal(id);
            sleep(TOAST_EXIT_ANIMATION).await;
            container.remove(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toast_slides_out_then_disappears() {
        let container = ToastContainer::new();
        container.show_toast("Saved", AlertKind::Success, Duration::from_millis(1000));

        let toasts = container.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].phase, ToastPhase::Visible);
        assert_eq!(toasts[0].kind, AlertKind::Success);

        sleep(Duration::from_millis(1100)).await;
        assert_eq!(container.toasts()[0].phase, ToastPhase::Dismissing);

        sleep(TOAST_EXIT_ANIMATION).await;
        assert!(container.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn default_duration_is_five_seconds() {
        let container = ToastContainer::new();
        container.notify("Access denied", AlertKind::Error);

        sleep(Duration::from_millis(4900)).await;
        assert_eq!(container.messages(), vec!["Access denied"]);

        sleep(Duration::from_millis(500)).await;
        assert!(container.messages().is_empty());
    }

    #[test]
    fn toast_without_runtime_stays_visible() {
        let container = ToastContainer::new();
        container.notify("Offline", AlertKind::Info);
        container.notify("Still offline", AlertKind::Info);
        assert_eq!(container.messages(), vec!["Offline", "Still offline"]);
    }
}

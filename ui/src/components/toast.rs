// Transient notification stack. Each toast slides in, holds, slides out,
// and is removed; every phase change is driven by its own timer task, and
// teardown cancels whatever timers are still pending.
use parking_lot::Mutex;
use shared::utils;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

impl ToastKind {
    /// Feather icon name rendered beside the message.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "alert-circle",
            ToastKind::Info => "info",
        }
    }
}

/// Where a toast is in its slide-in/slide-out lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Dismissing,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone, Copy)]
pub struct ToastTimings {
    /// Delay before the entrance transition lands.
    pub entrance: Duration,
    /// How long the toast stays fully visible.
    pub visible: Duration,
    /// Length of the dismiss transition before removal.
    pub dismiss: Duration,
}

impl ToastTimings {
    pub fn from_millis(entrance_ms: u64, visible_ms: u64, dismiss_ms: u64) -> Self {
        ToastTimings {
            entrance: Duration::from_millis(entrance_ms),
            visible: Duration::from_millis(visible_ms),
            dismiss: Duration::from_millis(dismiss_ms),
        }
    }
}

impl Default for ToastTimings {
    fn default() -> Self {
        ToastTimings {
            entrance: Duration::from_millis(10),
            visible: Duration::from_millis(4000),
            dismiss: Duration::from_millis(500),
        }
    }
}

struct Inner {
    toasts: Mutex<Vec<Toast>>,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
    timings: ToastTimings,
}

impl Inner {
    fn set_phase(&self, id: &str, phase: ToastPhase) {
        let mut toasts = self.toasts.lock();
        if let Some(toast) = toasts.iter_mut().find(|t| t.id == id) {
            toast.phase = phase;
        }
    }

    fn remove(&self, id: &str) {
        self.toasts.lock().retain(|t| t.id != id);
        self.timers.lock().remove(id);
    }
}

// Timer tasks hold only a weak reference, so dropping the last manager
// clone drops Inner and cancels whatever timelines are still pending.
impl Drop for Inner {
    fn drop(&mut self) {
        for (_, handle) in self.timers.lock().drain() {
            handle.abort();
        }
    }
}

#[derive(Clone)]
pub struct ToastManager {
    inner: Arc<Inner>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::with_timings(ToastTimings::default())
    }

    pub fn with_timings(timings: ToastTimings) -> Self {
        ToastManager {
            inner: Arc::new(Inner {
                toasts: Mutex::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                timings,
            }),
        }
    }

    /// Shows a toast and schedules its lifecycle. Returns the toast id.
    /// Must be called from within a tokio runtime.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) -> String {
        let id = utils::generate_uuid();
        let toast = Toast {
            id: id.clone(),
            kind,
            message: message.into(),
            phase: ToastPhase::Entering,
        };
        debug!(id = %toast.id, icon = toast.kind.icon(), "toast shown");
        self.inner.toasts.lock().push(toast);

        let timings = self.inner.timings;
        let inner = Arc::downgrade(&self.inner);
        let timer_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timings.entrance).await;
            let Some(stack) = inner.upgrade() else { return };
            stack.set_phase(&timer_id, ToastPhase::Shown);
            drop(stack);
            tokio::time::sleep(timings.visible).await;
            let Some(stack) = inner.upgrade() else { return };
            stack.set_phase(&timer_id, ToastPhase::Dismissing);
            drop(stack);
            tokio::time::sleep(timings.dismiss).await;
            let Some(stack) = inner.upgrade() else { return };
            stack.remove(&timer_id);
        });
        self.inner.timers.lock().insert(id.clone(), handle);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(ToastKind::Info, message)
    }

    /// Removes one toast immediately, cancelling its pending transitions.
    pub fn dismiss_now(&self, id: &str) {
        if let Some(handle) = self.inner.timers.lock().remove(id) {
            handle.abort();
        }
        self.inner.toasts.lock().retain(|t| t.id != id);
    }

    /// Removes everything and cancels all timers. Called on teardown so no
    /// timer fires for a screen that no longer exists.
    pub fn clear(&self) {
        for (_, handle) in self.inner.timers.lock().drain() {
            handle.abort();
        }
        self.inner.toasts.lock().clear();
    }

    pub fn active(&self) -> Vec<Toast> {
        self.inner.toasts.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.lock().is_empty()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

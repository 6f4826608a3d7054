use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

/// How long a toast stays on screen unless dismissed earlier.
pub const AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
        }
    }
}

/// Outlet for user-facing outcome messages.
///
/// Handed to whatever needs to report something, so non-visual code never
/// depends on the surface that renders the message.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(NotificationLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NotificationLevel::Warning, message);
    }
}

/// Writes straight to stderr. Used when there is no display surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        debug!(level = level.as_str(), text = message, "notification");
        let marker = match level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
            NotificationLevel::Info => "i",
            NotificationLevel::Warning => "!",
        };
        eprintln!("{marker} {message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    active: Vec<Toast>,
}

/// Stack of on-screen toasts, each with its own dismissal timer.
#[derive(Debug, Clone)]
pub struct ToastStack {
    state: Arc<Mutex<ToastState>>,
    dismiss_after: Duration,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStack {
    pub fn new() -> Self {
        Self::with_dismiss_after(AUTO_DISMISS)
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            dismiss_after,
        }
    }

    /// Push a toast and start its timer. Returns the toast id.
    ///
    /// Outside a tokio runtime the toast stays until dismissed by hand.
    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = {
            let mut state = lock(&self.state);
            state.next_id += 1;
            let id = state.next_id;
            state.active.push(Toast {
                id,
                level,
                message: message.into(),
            });
            id
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let state = Arc::clone(&self.state);
                let delay = self.dismiss_after;
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    lock(&state).active.retain(|t| t.id != id);
                });
            }
            Err(_) => warn!(toast_id = id, "no runtime available, toast will not auto-dismiss"),
        }

        id
    }

    /// Remove a toast before its timer fires. Returns whether it was still shown.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = lock(&self.state);
        let before = state.active.len();
        state.active.retain(|t| t.id != id);
        state.active.len() != before
    }

    /// Toasts currently shown, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        lock(&self.state).active.clone()
    }
}

impl Notifier for ToastStack {
    fn notify(&self, level: NotificationLevel, message: &str) {
        let id = self.push(level, message);
        info!(level = level.as_str(), toast_id = id, text = message, "notification");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

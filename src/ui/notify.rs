use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Error => "❌",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);

    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }
}

/// Notifications kept by `ToastCenter::history`.
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub phase: ToastPhase,
}

/// Holds the toasts currently on screen.
///
/// Each toast stays visible for `display`, then spends `exit` in the
/// leaving phase before it is removed. Dismissal runs on a spawned timer,
/// so a tokio runtime must be current when notifying; without one the
/// toast stays until `clear`.
#[derive(Clone)]
pub struct ToastCenter {
    toasts: Arc<Mutex<Vec<Toast>>>,
    history: Arc<Mutex<VecDeque<(Severity, String)>>>,
    display: Duration,
    exit: Duration,
}

impl ToastCenter {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            history: Arc::new(Mutex::new(VecDeque::new())),
            display,
            exit,
        }
    }

    pub fn from_config(ui: &UiConfig) -> Self {
        Self::new(ui.toast_duration(), ui.toast_exit())
    }

    /// Toasts currently shown, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    /// The most recent notifications, oldest first, up to `HISTORY_LIMIT`.
    pub fn history(&self) -> Vec<(Severity, String)> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.history
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.toasts.lock().clear();
    }

    fn schedule_dismiss(&self, id: Uuid) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(%id, "no runtime, toast will not auto-dismiss");
            return;
        };
        let toasts = Arc::clone(&self.toasts);
        let (display, exit) = (self.display, self.exit);
        handle.spawn(async move {
            tokio::time::sleep(display).await;
            if let Some(t) = toasts.lock().iter_mut().find(|t| t.id == id) {
                t.phase = ToastPhase::Leaving;
            }
            tokio::time::sleep(exit).await;
            toasts.lock().retain(|t| t.id != id);
            debug!(%id, "toast dismissed");
        });
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, severity: Severity, message: &str) {
        let toast = Toast {
            id: Uuid::new_v4(),
            severity,
            message: message.to_string(),
            phase: ToastPhase::Visible,
        };
        let id = toast.id;
        self.toasts.lock().push(toast);
        {
            let mut history = self.history.lock();
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back((severity, message.to_string()));
        }
        self.schedule_dismiss(id);
    }
}

//! Formatting helpers, notifications and view primitives.

pub mod console;
pub mod format;
pub mod notify;
pub mod view;

pub use self::console::{AssumeYes, ConsoleNotifier, TerminalConfirm};
pub use format::{
    category_color, file_icon, format_date, format_file_size, join_tags, parse_tags,
    DEFAULT_CATEGORY_COLOR, DEFAULT_FILE_ICON,
};
pub use notify::{Notifier, Severity, Toast, ToastCenter, ToastPhase};
pub use view::{Modal, ProgressBar, Region};

/// Interactive confirmation for destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

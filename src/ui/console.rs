use console::style;
use tracing::warn;

use super::notify::{Notifier, Severity};
use super::Confirm;

/// Prints notifications as styled lines on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let line = format!("{} {}", severity.icon(), message);
        let styled = match severity {
            Severity::Success => style(line).green(),
            Severity::Error => style(line).red().bold(),
            Severity::Info => style(line).cyan(),
            Severity::Warning => style(line).yellow(),
        };
        eprintln!("{styled}");
    }
}

/// Asks on the terminal; a failed prompt counts as "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "confirmation prompt failed");
                false
            }
        }
    }
}

/// Accepts every confirmation, for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Single-shot timer whose deadline moves on every trigger.
///
/// `fired` is safe to drop before completion: the deadline stays armed
/// until the timer actually elapses or is cancelled.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Arm the timer, restarting any pending countdown.
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolve once the quiet period after the last trigger has passed.
    /// Never resolves while the timer is not armed.
    pub async fn fired(&mut self) {
        let Some(deadline) = self.deadline else {
            std::future::pending::<()>().await;
            return;
        };
        sleep_until(deadline).await;
        self.deadline = None;
    }
}

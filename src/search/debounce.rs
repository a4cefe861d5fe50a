use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep_until};

/// Trailing-edge debounce timer. Holds only a deadline; the query that
/// eventually fires is read from live state at fire time, so edits made
/// during the quiet window are never lost.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arms the timer one window from now. Re-arming pushes the deadline
    /// forward, so a burst of keystrokes fires once after the last one.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Completes at the armed deadline. Callers guard on [`is_armed`];
    /// an unarmed timer completes immediately.
    ///
    /// [`is_armed`]: Debouncer::is_armed
    pub fn expired(&self) -> Sleep {
        sleep_until(self.deadline.unwrap_or_else(Instant::now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_one_window_after_the_last_schedule() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        debounce.schedule();

        tokio::time::advance(Duration::from_millis(200)).await;
        debounce.schedule();

        // The first deadline has passed but the timer was pushed forward.
        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(Instant::now() < debounce.deadline.unwrap());

        tokio::time::advance(Duration::from_millis(150)).await;
        debounce.expired().await;
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_clears_the_deadline() {
        let mut debounce = Debouncer::new(Duration::from_millis(300));
        debounce.schedule();
        assert!(debounce.is_armed());

        debounce.disarm();
        assert!(!debounce.is_armed());
    }
}

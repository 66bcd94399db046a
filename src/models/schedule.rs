//! Delayed work polled from the frame tick.

use std::time::{Duration, Instant};

/// A one-shot trigger that fires once its delay has elapsed.
///
/// The clock starts on the first poll rather than at construction, so a task
/// scheduled in the middle of an event handler waits a full delay measured in
/// the same time base as the tick that eventually fires it.
#[derive(Clone, Copy, Debug)]
pub struct DelayedTask {
    delay: Duration,
    due: Option<Instant>,
}

impl DelayedTask {
    pub fn after(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// Returns true once the delay has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = *self.due.get_or_insert(now + self.delay);
        now >= due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut task = DelayedTask::after(Duration::from_millis(500));
        assert!(!task.poll(start));
        assert!(!task.poll(start + Duration::from_millis(499)));
        assert!(task.poll(start + Duration::from_millis(500)));
        assert!(task.poll(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_zero_delay_fires_on_first_poll() {
        let mut task = DelayedTask::after(Duration::ZERO);
        assert!(task.poll(Instant::now()));
    }
}

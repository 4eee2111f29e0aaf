use std::time::{Duration, Instant};

/// Single-shot countdown that delays hiding stale results.
///
/// The timer holds no callback: the owner polls [`DebounceTimer::expire`]
/// from its event loop and reacts when it returns `true`.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// (Re)start the countdown from `now`
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_interval() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.start(start);

        assert!(!timer.expire(start + Duration::from_millis(99)));
        assert!(timer.expire(start + Duration::from_millis(100)));
        assert!(!timer.expire(start + Duration::from_millis(500)));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_restart_pushes_deadline() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.start(start);
        timer.start(start + Duration::from_millis(80));

        assert!(!timer.expire(start + Duration::from_millis(120)));
        assert!(timer.expire(start + Duration::from_millis(180)));
    }

    #[test]
    fn test_stop_cancels() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        timer.start(start);
        timer.stop();

        assert_eq!(timer.deadline(), None);
        assert!(!timer.expire(start + Duration::from_secs(1)));
    }
}

use std::time::{Duration, Instant};

/// Event-loop poll interval in milliseconds (redraw cadence for the clock)
pub const DEFAULT_FRAME_MS: u64 = 250;

/// Countdown step
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Get frame duration
pub fn frame_duration() -> Duration {
    Duration::from_millis(DEFAULT_FRAME_MS)
}

/// A single cancellable one-second schedule.
///
/// Only one deadline exists at a time: arming an armed ticker replaces the
/// deadline, disarming drops it. Each firing schedules the next deadline one
/// period after the moment it was observed, so late polls shift the schedule
/// instead of producing catch-up ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// Schedule the next tick one period from `now`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm or disarm to match `active`, keeping an existing deadline
    pub fn follow(&mut self, active: bool, now: Instant) {
        match (active, self.is_armed()) {
            (true, false) => self.arm(now),
            (false, true) => self.disarm(),
            _ => {}
        }
    }

    /// Returns true when the deadline has passed, and re-arms from `now`
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.arm(now);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick, capped at `max` (poll timeout)
    pub fn timeout(&self, now: Instant, max: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(max),
            None => max,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert!(!ticker.is_armed());
        assert!(!ticker.fire_if_due(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_after_period_then_rearms() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);

        assert!(!ticker.fire_if_due(start + Duration::from_millis(999)));
        let t1 = start + Duration::from_millis(1000);
        assert!(ticker.fire_if_due(t1));
        // Immediately after firing, next deadline is a full period away
        assert!(!ticker.fire_if_due(t1));
        assert!(ticker.fire_if_due(t1 + Duration::from_secs(1)));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);
        let late = start + Duration::from_secs(5);
        assert!(ticker.fire_if_due(late));
        assert!(!ticker.fire_if_due(late));
    }

    #[test]
    fn test_disarm_cancels() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.arm(start);
        ticker.disarm();
        assert!(!ticker.fire_if_due(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_follow_keeps_existing_deadline() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        ticker.follow(true, start);
        ticker.follow(true, start + Duration::from_millis(900));
        assert!(ticker.fire_if_due(start + Duration::from_secs(1)));

        ticker.follow(false, start);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_timeout() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        let max = Duration::from_millis(250);
        assert_eq!(ticker.timeout(start, max), max);
        ticker.arm(start);
        assert_eq!(ticker.timeout(start + Duration::from_millis(900), max), Duration::from_millis(100));
        assert_eq!(ticker.timeout(start + Duration::from_secs(3), max), Duration::ZERO);
    }
}

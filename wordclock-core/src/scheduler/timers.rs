//! Poll-style interval timers
//!
//! A timer fires when strictly more than its period has passed since it
//! last fired, and is re-based to the current time when it does. Missed
//! periods are dropped, never replayed.

/// One "last fired" timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    last_fired_ms: u64,
}

impl Timer {
    pub const fn new(now_ms: u64) -> Self {
        Self { last_fired_ms: now_ms }
    }

    pub fn last_fired_ms(&self) -> u64 {
        self.last_fired_ms
    }

    /// Check if more than `period_ms` has passed
    pub fn elapsed(&self, now_ms: u64, period_ms: u32) -> bool {
        now_ms.saturating_sub(self.last_fired_ms) > u64::from(period_ms)
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.last_fired_ms = now_ms;
    }

    /// Restart and return true if the period has elapsed
    pub fn fire(&mut self, now_ms: u64, period_ms: u32) -> bool {
        if self.elapsed(now_ms, period_ms) {
            self.restart(now_ms);
            true
        } else {
            false
        }
    }
}

/// Every timer the scheduler polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerTimers {
    pub heartbeat: Timer,
    /// Per-state update
    pub step: Timer,
    /// Auto-change dwell
    pub state_change: Timer,
    /// Compositor refresh
    pub matrix_update: Timer,
    pub nightmode_check: Timer,
    /// When the last direct frame arrived, `None` if never
    pub direct_override_ms: Option<u64>,
}

impl SchedulerTimers {
    /// All timers start at the boot timestamp
    pub const fn new(boot_ms: u64) -> Self {
        Self {
            heartbeat: Timer::new(boot_ms),
            step: Timer::new(boot_ms),
            state_change: Timer::new(boot_ms),
            matrix_update: Timer::new(boot_ms),
            nightmode_check: Timer::new(boot_ms),
            direct_override_ms: None,
        }
    }

    /// Check if a direct frame still suppresses normal rendering
    pub fn direct_override_active(&self, now_ms: u64, timeout_ms: u32) -> bool {
        match self.direct_override_ms {
            Some(at) => now_ms.saturating_sub(at) <= u64::from(timeout_ms),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_strictly_after_period() {
        let mut timer = Timer::new(0);
        assert!(!timer.fire(100, 100));
        assert!(timer.fire(101, 100));
        assert_eq!(timer.last_fired_ms(), 101);
    }

    #[test]
    fn test_no_catch_up() {
        let mut timer = Timer::new(0);
        // Ten periods late: fires once, then waits a full period again
        assert!(timer.fire(1_000, 100));
        assert!(!timer.fire(1_001, 100));
        assert!(!timer.fire(1_100, 100));
        assert!(timer.fire(1_101, 100));
    }

    #[test]
    fn test_clock_going_backwards_does_not_fire() {
        let timer = Timer::new(500);
        assert!(!timer.elapsed(10, 0));
    }

    #[test]
    fn test_direct_override_window() {
        let mut timers = SchedulerTimers::new(0);
        assert!(!timers.direct_override_active(0, 5000));

        timers.direct_override_ms = Some(1_000);
        assert!(timers.direct_override_active(1_000, 5000));
        assert!(timers.direct_override_active(6_000, 5000));
        assert!(!timers.direct_override_active(6_001, 5000));
    }
}

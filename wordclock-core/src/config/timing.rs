//! Periods and timeouts
//!
//! All values are milliseconds of monotonic uptime.

use crate::state::{ModeState, NUM_STATES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PERIOD_HEARTBEAT_MS: u32 = 1000;
pub const PERIOD_ANIMATION_MS: u32 = 200;
pub const PERIOD_TETRIS_MS: u32 = 50;
pub const PERIOD_SNAKE_MS: u32 = 50;
pub const PERIOD_PONG_MS: u32 = 10;
pub const TIMEOUT_DIRECT_MS: u32 = 5000;
pub const PERIOD_STATE_CHANGE_MS: u32 = 10_000;
pub const PERIOD_TIME_UPDATE_MS: u32 = 1000;
pub const PERIOD_MATRIX_UPDATE_MS: u32 = 100;
pub const PERIOD_NIGHTMODE_CHECK_MS: u32 = 20_000;

pub const SHORT_PRESS_MS: u32 = 100;
pub const LONG_PRESS_MS: u32 = 2000;

/// Uptime after which a restart is scheduled (u32 millisecond counters
/// wrap at 4 294 967 295)
pub const AUTO_RESTART_AFTER_MS: u64 = 3_000_000_000;
/// Hour of day at which the scheduled restart happens
pub const AUTO_RESTART_HOUR: u8 = 4;

/// Scheduler periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Heartbeat log interval
    pub heartbeat_ms: u32,
    /// Clock face refresh
    pub time_update_ms: u32,
    /// Generic animation step (spiral, self-playing games)
    pub animation_ms: u32,
    /// Interactive tetris step
    pub tetris_ms: u32,
    /// Interactive snake step
    pub snake_ms: u32,
    /// Ping pong step (both flavours)
    pub pong_ms: u32,
    /// How long a direct pixel frame suppresses normal rendering
    pub direct_timeout_ms: u32,
    /// Dwell time per mode while auto-change is on
    pub state_change_ms: u32,
    /// Compositor refresh
    pub matrix_update_ms: u32,
    /// Nightmode window check
    pub nightmode_check_ms: u32,
    /// Minimum press length to count as a short press
    pub short_press_ms: u32,
    /// Minimum press length to count as a long press
    pub long_press_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            heartbeat_ms: PERIOD_HEARTBEAT_MS,
            time_update_ms: PERIOD_TIME_UPDATE_MS,
            animation_ms: PERIOD_ANIMATION_MS,
            tetris_ms: PERIOD_TETRIS_MS,
            snake_ms: PERIOD_SNAKE_MS,
            pong_ms: PERIOD_PONG_MS,
            direct_timeout_ms: TIMEOUT_DIRECT_MS,
            state_change_ms: PERIOD_STATE_CHANGE_MS,
            matrix_update_ms: PERIOD_MATRIX_UPDATE_MS,
            nightmode_check_ms: PERIOD_NIGHTMODE_CHECK_MS,
            short_press_ms: SHORT_PRESS_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

impl TimingConfig {
    /// Update periods indexed by `[auto_change][state]`
    ///
    /// Interactive games run fast; their self-playing variants share the
    /// slower animation pace. Ping pong keeps its own rate in both.
    pub fn period_table(&self) -> [[u32; NUM_STATES]; 2] {
        [
            [
                self.time_update_ms,
                self.time_update_ms,
                self.animation_ms,
                self.tetris_ms,
                self.snake_ms,
                self.pong_ms,
            ],
            [
                self.time_update_ms,
                self.time_update_ms,
                self.animation_ms,
                self.animation_ms,
                self.animation_ms,
                self.pong_ms,
            ],
        ]
    }

    /// Update period of `state`
    pub fn period(&self, auto_change: bool, state: ModeState) -> u32 {
        self.period_table()[usize::from(auto_change)][usize::from(state.id())]
    }
}

/// Preventive daily restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoRestartConfig {
    pub enabled: bool,
    /// Minimum uptime before a restart may be requested
    pub after_uptime_ms: u64,
    /// Hour of day (0-23) at which the restart happens
    pub hour: u8,
}

impl Default for AutoRestartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            after_uptime_ms: AUTO_RESTART_AFTER_MS,
            hour: AUTO_RESTART_HOUR,
        }
    }
}

impl AutoRestartConfig {
    /// Check if a restart is due
    pub fn is_due(&self, uptime_ms: u64, hour: u8) -> bool {
        self.enabled && uptime_ms > self.after_uptime_ms && hour == self.hour
    }
}

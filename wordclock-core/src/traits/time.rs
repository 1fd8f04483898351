//! Time of day source

use crate::phrase::ClockTime;

/// Wall-clock time provider (NTP client, RTC, ...)
///
/// The core treats it as always available and already resolved to a
/// valid 24-hour time.
pub trait TimeSource {
    /// Current local time of day
    fn now(&mut self) -> ClockTime;
}

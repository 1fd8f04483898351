//! Push button edge tracking
//!
//! The board samples the button level every loop. A press is timed from
//! its rising edge and classified on release.

use crate::config::TimingConfig;

/// Classified button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Held longer than the short press threshold
    ShortPress,
    /// Held longer than the long press threshold
    LongPress,
}

/// Edge detector for one button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTracker {
    pressed: bool,
    press_start_ms: u64,
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            press_start_ms: 0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed the sampled level, returning an action on release
    ///
    /// Presses up to the short press threshold are bounce and ignored.
    pub fn update(&mut self, pressed: bool, now_ms: u64, timing: &TimingConfig) -> Option<ButtonAction> {
        let was_pressed = self.pressed;
        self.pressed = pressed;

        match (was_pressed, pressed) {
            (false, true) => {
                debug!("button press started");
                self.press_start_ms = now_ms;
                None
            }
            (true, false) => {
                let held = now_ms.saturating_sub(self.press_start_ms);
                if held > u64::from(timing.long_press_ms) {
                    debug!("button press ended - longpress");
                    Some(ButtonAction::LongPress)
                } else if held > u64::from(timing.short_press_ms) {
                    debug!("button press ended - shortpress");
                    Some(ButtonAction::ShortPress)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(tracker: &mut ButtonTracker, from: u64, to: u64) -> Option<ButtonAction> {
        let timing = TimingConfig::default();
        assert_eq!(tracker.update(true, from, &timing), None);
        // Holding produces nothing
        assert_eq!(tracker.update(true, (from + to) / 2, &timing), None);
        tracker.update(false, to, &timing)
    }

    #[test]
    fn test_bounce_ignored() {
        let mut tracker = ButtonTracker::new();
        assert_eq!(press(&mut tracker, 1_000, 1_100), None);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_short_press() {
        let mut tracker = ButtonTracker::new();
        assert_eq!(press(&mut tracker, 1_000, 1_101), Some(ButtonAction::ShortPress));
        assert_eq!(press(&mut tracker, 5_000, 7_000), Some(ButtonAction::ShortPress));
    }

    #[test]
    fn test_long_press() {
        let mut tracker = ButtonTracker::new();
        assert_eq!(press(&mut tracker, 1_000, 3_001), Some(ButtonAction::LongPress));
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = ButtonTracker::new();
        let timing = TimingConfig::default();
        assert_eq!(tracker.update(false, 10_000, &timing), None);
    }
}

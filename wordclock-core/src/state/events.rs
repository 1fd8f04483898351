//! Events that trigger mode transitions

use super::machine::ModeState;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// External command naming the target mode
    Select(ModeState),
    /// Short button press
    ShortPress,
    /// Auto-change dwell period elapsed
    AutoAdvance,
}

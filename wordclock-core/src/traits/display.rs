//! Display sink trait for the LED matrix

use crate::grid::{Grid, MinuteIndicator};

/// Errors that can occur while pushing frames to the LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Transfer to the LED driver failed
    Communication,
    /// Driver not ready to accept a frame
    NotReady,
    /// Frame larger than the driver buffer
    BufferOverflow,
}

/// Trait for the physical LED matrix
///
/// The sink is dumb: it shows exactly what it receives. Smoothing and
/// blanking are decided by the compositor before a frame gets here.
pub trait DisplaySink {
    /// Show a full grid frame
    fn show(&mut self, grid: &Grid) -> Result<(), DisplayError>;

    /// Set the four minute indicator lights
    fn set_min_indicator(&mut self, indicator: MinuteIndicator) -> Result<(), DisplayError>;

    /// Set global brightness (0-255)
    fn set_brightness(&mut self, brightness: u8) -> Result<(), DisplayError>;
}

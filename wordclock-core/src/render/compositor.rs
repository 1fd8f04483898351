//! Smoothed pixel compositor
//!
//! Producers write the target grid; only the compositor writes the current
//! grid, and only the current grid reaches the display sink.

use crate::config::ConfigError;
use crate::grid::{Grid, MinuteIndicator, Rgb};
use crate::traits::{DisplayError, DisplaySink};

/// Fixed-point scale of [`SmoothingFactor`] (Q8)
const SMOOTHING_ONE: u16 = 256;

/// Per-tick interpolation weight, stored as Q8 fixed point in `1..=256`
///
/// Every step moves a channel by `ceil(distance * factor)`, so a channel
/// reaches its target in finitely many ticks and never passes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmoothingFactor(u16);

impl SmoothingFactor {
    /// Jump straight to the target
    pub const INSTANT: SmoothingFactor = SmoothingFactor(SMOOTHING_ONE);

    /// Crossfade used by the clock faces
    pub const DEFAULT: SmoothingFactor = SmoothingFactor(SMOOTHING_ONE / 2);

    /// Convert a factor in (0, 1]
    pub fn from_f32(factor: f32) -> Result<Self, ConfigError> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::InvalidValue("smoothing"));
        }
        let q = (factor * SMOOTHING_ONE as f32 + 0.5) as u16;
        Ok(Self(q.clamp(1, SMOOTHING_ONE)))
    }

    /// Factor as a float, for logs and status
    pub fn as_f32(self) -> f32 {
        self.0 as f32 / SMOOTHING_ONE as f32
    }

    pub fn is_instant(self) -> bool {
        self.0 == SMOOTHING_ONE
    }

    fn step(self, current: u8, target: u8) -> u8 {
        let distance = u32::from(current.abs_diff(target));
        let one = u32::from(SMOOTHING_ONE);
        let delta = ((distance * u32::from(self.0) + one - 1) / one) as u8;
        if target > current {
            current + delta
        } else {
            current - delta
        }
    }

    /// Move `current` one step toward `target`
    pub fn blend(self, current: Rgb, target: Rgb) -> Rgb {
        Rgb::new(
            self.step(current.r, target.r),
            self.step(current.g, target.g),
            self.step(current.b, target.b),
        )
    }
}

impl Default for SmoothingFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Target/current grid pair plus the minute indicator
#[derive(Debug, Clone)]
pub struct Compositor {
    target: Grid,
    current: Grid,
    indicator: MinuteIndicator,
    smoothing: SmoothingFactor,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(SmoothingFactor::DEFAULT)
    }
}

impl Compositor {
    pub const fn new(smoothing: SmoothingFactor) -> Self {
        Self {
            target: Grid::new(),
            current: Grid::new(),
            indicator: MinuteIndicator::OFF,
            smoothing,
        }
    }

    pub fn target(&self) -> &Grid {
        &self.target
    }

    /// Grid for the active producer to draw into
    pub fn target_mut(&mut self) -> &mut Grid {
        &mut self.target
    }

    /// Replace the target grid as a whole
    pub fn set_target(&mut self, grid: Grid) {
        self.target = grid;
    }

    /// What the display currently shows
    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn indicator(&self) -> MinuteIndicator {
        self.indicator
    }

    pub fn set_indicator(&mut self, indicator: MinuteIndicator) {
        self.indicator = indicator;
    }

    pub fn smoothing(&self) -> SmoothingFactor {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: SmoothingFactor) {
        self.smoothing = smoothing;
    }

    /// Clear the target grid; the current grid fades out on later ticks
    pub fn flush(&mut self) {
        self.target.flush();
    }

    /// Blend current toward target once and emit the result
    pub fn tick<D: DisplaySink>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        let smoothing = self.smoothing;
        for (cur_row, tgt_row) in self.current.rows_mut().iter_mut().zip(self.target.rows()) {
            for (cur, tgt) in cur_row.iter_mut().zip(tgt_row) {
                *cur = smoothing.blend(*cur, *tgt);
            }
        }
        self.emit(display)
    }

    /// Copy target to current without smoothing and emit it
    pub fn draw_instant<D: DisplaySink>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        self.current = self.target.clone();
        self.emit(display)
    }

    fn emit<D: DisplaySink>(&self, display: &mut D) -> Result<(), DisplayError> {
        display.show(&self.current)?;
        display.set_min_indicator(self.indicator)
    }
}

//! Configuration type definitions
//!
//! [`Settings`] is the block a user can change at runtime (nightmode
//! window, brightness, colours). The board persists it as postcard binary
//! data and hands it back at boot. [`ClockConfig`] wraps it together with
//! the fixed timing and restart parameters.

use core::fmt;

use super::timing::{AutoRestartConfig, TimingConfig};
use crate::grid::{colors, Orientation, Rgb};
use crate::phrase::ClockTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound of an encoded [`Settings`] block
pub const SETTINGS_MAX_SIZE: usize = 32;

/// Default brightness (0-255)
pub const DEFAULT_BRIGHTNESS: u8 = 40;

/// Default smoothing factor of the clock faces
pub const DEFAULT_SMOOTHING: f32 = 0.5;

/// Main colour used when the inverse of the requested one is black
pub const FALLBACK_MAIN: Rgb = Rgb::new(125, 125, 125);

/// Second colour used when the inverse of the requested one is black
pub const FALLBACK_SECOND: Rgb = Rgb::new(255, 255, 255);

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed
    Parse,
    /// Serialization failed (buffer too small)
    Encode,
    /// Deserialization failed
    Decode,
    /// A field is out of range
    InvalidValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse => write!(f, "config parse error"),
            ConfigError::Encode => write!(f, "settings encode error"),
            ConfigError::Decode => write!(f, "settings decode error"),
            ConfigError::InvalidValue(field) => write!(f, "invalid value for {}", field),
        }
    }
}

/// Nightly blank-out window
///
/// Nightmode switches on when the clock reads exactly `start` and off when
/// it reads exactly `end`. The window may span midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NightmodeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Default for NightmodeWindow {
    fn default() -> Self {
        Self {
            start: ClockTime::new_unchecked(23, 0),
            end: ClockTime::new_unchecked(7, 0),
        }
    }
}

impl NightmodeWindow {
    /// Check if `now` is the start minute
    pub fn starts_at(&self, now: ClockTime) -> bool {
        now == self.start
    }

    /// Check if `now` is the end minute
    pub fn ends_at(&self, now: ClockTime) -> bool {
        now == self.end
    }
}

/// The two colours of the clock faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockColors {
    /// Phrase words, digital clock hours
    pub main: Rgb,
    /// Digital clock minutes
    pub second: Rgb,
}

impl Default for ClockColors {
    fn default() -> Self {
        Self {
            main: colors::RED,
            second: colors::DARK_GREEN,
        }
    }
}

impl ClockColors {
    /// Pair `main` with its inverse
    ///
    /// White has a black inverse, which would leave the minutes invisible,
    /// so it maps to a grey/white pair instead.
    pub fn from_main(main: Rgb) -> Self {
        let second = main.inverse();
        if second.is_off() {
            Self {
                main: FALLBACK_MAIN,
                second: FALLBACK_SECOND,
            }
        } else {
            Self { main, second }
        }
    }
}

/// User-changeable settings, persisted by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub nightmode: NightmodeWindow,
    /// LED brightness (0-255)
    pub brightness: u8,
    pub colors: ClockColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nightmode: NightmodeWindow::default(),
            brightness: DEFAULT_BRIGHTNESS,
            colors: ClockColors::default(),
        }
    }
}

impl Settings {
    /// Check decoded values
    ///
    /// [`ClockTime`] validates on construction, but a decoded block
    /// bypasses the constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (time, field) in [
            (self.nightmode.start, "nightmode.start"),
            (self.nightmode.end, "nightmode.end"),
        ] {
            if ClockTime::new(time.hour(), time.minute()).is_err() {
                return Err(ConfigError::InvalidValue(field));
            }
        }
        Ok(())
    }

    /// Encode into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Decode and validate a persisted block
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let settings: Settings = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Initial user settings (overridden by the persisted block, if any)
    pub settings: Settings,
    pub timing: TimingConfig,
    pub restart: AutoRestartConfig,
    /// Smoothing factor of the clock faces, in (0, 1]
    pub smoothing: f32,
    /// Panel wiring of the letter grid
    pub orientation: Orientation,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            timing: TimingConfig::default(),
            restart: AutoRestartConfig::default(),
            smoothing: DEFAULT_SMOOTHING,
            orientation: Orientation::RowMajor,
        }
    }
}

impl ClockConfig {
    /// Check every field that has a restricted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;

        // Written to reject NaN as well
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::InvalidValue("smoothing"));
        }
        if self.restart.hour >= 24 {
            return Err(ConfigError::InvalidValue("restart.hour"));
        }
        if self.timing.matrix_update_ms == 0 {
            return Err(ConfigError::InvalidValue("timing.matrix_update_ms"));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    ///
    /// Every table and key is optional; missing values keep their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ClockConfig = toml::from_str(text).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

//! Phrase to grid mapping
//!
//! Words are located with a greedy forward-only search: each word must start
//! at or after the end of the previous one. The letter soup is laid out so
//! that every sentence the idiom produces reads left to right, top to bottom.

use super::{Grid, Rgb, VocabularyGrid};
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of minute indicator lights
pub const INDICATOR_COUNT: u8 = 4;

/// Map a phrase onto a fresh grid
///
/// Every letter of every word is set to `color`; all other cells are dark.
/// On failure nothing is returned, so callers keep whatever grid they had
/// before and a half-written frame never reaches the compositor.
pub fn map_phrase(
    vocabulary: &VocabularyGrid,
    words: &[&'static str],
    color: Rgb,
) -> Result<Grid, Error> {
    let mut grid = Grid::new();
    let orientation = vocabulary.orientation();
    let mut last_end = 0;

    for &word in words.iter().filter(|w| !w.is_empty()) {
        let start = match vocabulary.find(word, last_end) {
            Some(start) => start,
            None => {
                warn!("word is not possible to show on clock: {=str}", word);
                return Err(Error::UnmappableWord { word });
            }
        };

        for offset in start..start + word.len() {
            if let Some((x, y)) = orientation.cell(offset) {
                grid.set(x, y, color);
            }
        }

        last_end = start + word.len();
    }

    Ok(grid)
}

/// State of the four minute indicator lights
///
/// Bit `n` of the pattern lights indicator `n`, counted clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinuteIndicator {
    pattern: u8,
    color: Rgb,
}

impl MinuteIndicator {
    /// All indicators dark
    pub const OFF: MinuteIndicator = MinuteIndicator {
        pattern: 0,
        color: Rgb::OFF,
    };

    /// Indicators for the minutes past the last five-minute step
    ///
    /// `minute % 5` lights that many indicators as a growing prefix.
    pub fn for_minute(minute: u8, color: Rgb) -> Self {
        match minute % 5 {
            0 => Self::OFF,
            n => Self {
                pattern: (1u8 << n) - 1,
                color,
            },
        }
    }

    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Number of lit indicators
    pub fn lit_count(&self) -> u8 {
        self.pattern.count_ones() as u8
    }

    /// Check if indicator `index` (0..4) is lit
    pub fn is_lit(&self, index: u8) -> bool {
        index < INDICATOR_COUNT && self.pattern & (1 << index) != 0
    }
}

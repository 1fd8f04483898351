//! Time to phrase translation
//!
//! An [`Idiom`] owns both the letter soup and the sentence rules. The two
//! are versioned together: every phrase an idiom produces must be mappable
//! onto its own vocabulary grid (checked by property tests).

pub mod swiss_german;

pub use swiss_german::SwissGerman;

use heapless::Vec;

use crate::error::Error;
use crate::grid::VocabularyGrid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum words in one sentence
pub const MAX_PHRASE_WORDS: usize = 8;

/// Ordered words of one sentence, built fresh for every frame
pub type Phrase = Vec<&'static str, MAX_PHRASE_WORDS>;

/// Wall-clock time of day, 24-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Validate and build a time
    pub fn new(hour: u8, minute: u8) -> Result<Self, Error> {
        if hour >= 24 || minute >= 60 {
            return Err(Error::InvalidTimeInput { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Build a time from literals already known to be in range
    pub(crate) const fn new_unchecked(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour on a 12-hour dial (0 stands for twelve)
    pub fn hour12(&self) -> u8 {
        self.hour % 12
    }
}

/// A language variant of the clock face
pub trait Idiom {
    /// Letter soup this idiom is laid out on
    fn vocabulary(&self) -> &VocabularyGrid;

    /// Sentence for the given time
    ///
    /// Total over every valid [`ClockTime`]; never fails.
    fn phrase(&self, time: ClockTime) -> Phrase;
}
